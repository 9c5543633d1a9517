use {
    crate::{Condition, ConditionKey, ConditionOperation, Value, ValueList, ValueType},
    indoc::indoc,
    pretty_assertions::assert_eq,
};

#[test_log::test]
fn test_single_values() {
    let c: Condition = serde_json::from_str(indoc! { r#"
        {
            "StringEquals": {
                "k1": "v1",
                "k2": "v2"
            }
        }"# })
    .unwrap();

    assert_eq!(
        c,
        Condition::new(vec![ConditionOperation::new(
            "StringEquals",
            vec![
                ConditionKey::new("k1", Value::from("v1")),
                ConditionKey::new("k2", Value::from("v2")),
            ]
        )])
    );
    assert_eq!(c.len(), 1);
    assert!(!c.is_empty());
}

#[test_log::test]
fn test_operations_keep_declaration_order() {
    let c: Condition = serde_json::from_str(indoc! { r#"
        {
            "StringLike": {"s3:prefix": ["home/", "home/${aws:username}/*"]},
            "NumericLessThan": {"s3:max-keys": 10},
            "Bool": {"aws:SecureTransport": false},
            "ForAnyValue:StringLike": {"cognito-identity.amazonaws.com:amr": "authenticated"}
        }"# })
    .unwrap();

    let names: Vec<&str> = c.operations().iter().map(|op| op.operation()).collect();
    assert_eq!(names, vec!["StringLike", "NumericLessThan", "Bool", "ForAnyValue:StringLike"]);

    assert_eq!(
        c.operations()[0].keys()[0].values(),
        &ValueList::List(vec![Value::from("home/"), Value::from("home/${aws:username}/*")])
    );
    assert_eq!(c.operations()[1].keys()[0].values(), &ValueList::One(Value::Int64(10)));
    assert_eq!(c.operations()[2].keys()[0].values(), &ValueList::One(Value::Bool(false)));
    assert_eq!(c.operations()[3].keys()[0].key(), "cognito-identity.amazonaws.com:amr");
}

#[test_log::test]
fn test_mixed_types_are_grammatical() {
    let c: Condition = serde_json::from_str(r#"{"StringEquals": {"k": ["x", 1, true]}}"#).unwrap();
    let types: Vec<ValueType> = c.operations()[0].keys()[0].values().values().iter().map(Value::value_type).collect();
    assert_eq!(types, vec![ValueType::String, ValueType::Int64, ValueType::Bool]);
}

#[test_log::test]
fn test_integer_range() {
    let c: Condition = serde_json::from_str(r#"{"NumericEquals": {"k": [-9223372036854775808, 9223372036854775807]}}"#).unwrap();
    assert_eq!(
        c.operations()[0].keys()[0].values().values(),
        &[Value::Int64(i64::MIN), Value::Int64(i64::MAX)]
    );

    let e = serde_json::from_str::<Condition>(r#"{"NumericEquals": {"k": 9223372036854775808}}"#).unwrap_err();
    assert!(e.to_string().starts_with("invalid value: integer `9223372036854775808`"));
}

#[test_log::test]
fn test_bad_values() {
    let e = serde_json::from_str::<Condition>(r#"{"NumericEquals": {"k": 1.5}}"#).unwrap_err();
    assert!(e.to_string().starts_with("invalid type: floating point `1.5`"));

    let e = serde_json::from_str::<Condition>(r#"{"StringEquals": {"k": null}}"#).unwrap_err();
    assert!(e.to_string().starts_with("invalid type: null"));

    let e = serde_json::from_str::<Condition>(r#"{"StringEquals": {"k": {"a": "b"}}}"#).unwrap_err();
    assert!(e.to_string().starts_with("invalid type: map"));

    let e = serde_json::from_str::<Condition>(r#"{"StringEquals": {"k": []}}"#).unwrap_err();
    assert!(e.to_string().starts_with("invalid length 0"));

    let e = serde_json::from_str::<Condition>(r#"{"StringEquals": {"k": [["a"]]}}"#).unwrap_err();
    assert!(e.to_string().starts_with("invalid type: sequence"));
}

#[test_log::test]
fn test_bad_shapes() {
    let e = serde_json::from_str::<Condition>("{}").unwrap_err();
    assert!(e.to_string().starts_with("invalid length 0, expected a non-empty map of condition operations"));

    let e = serde_json::from_str::<Condition>(r#"{"StringEquals": {}}"#).unwrap_err();
    assert!(e.to_string().starts_with("invalid length 0, expected a non-empty map of condition keys to values"));

    let e = serde_json::from_str::<Condition>(r#"{"StringEquals": "k"}"#).unwrap_err();
    assert!(e.to_string().starts_with(r#"invalid type: string "k""#));

    assert!(serde_json::from_str::<Condition>(r#"["StringEquals"]"#).is_err());
    assert!(serde_json::from_str::<Condition>(r#"{1: {"k": "v"}}"#).is_err());
}

#[test_log::test]
fn test_empty_names_are_grammatical() {
    let c: Condition = serde_json::from_str(r#"{"": {"": "v"}}"#).unwrap();
    assert_eq!(c.operations()[0].operation(), "");
    assert_eq!(c.operations()[0].keys()[0].key(), "");
}

#[test_log::test]
fn test_value_type_names() {
    assert_eq!(ValueType::String.to_string(), "string");
    assert_eq!(ValueType::Int64.to_string(), "int64");
    assert_eq!(ValueType::Bool.to_string(), "bool");
    assert_eq!(serde_json::to_string(&ValueType::Int64).unwrap(), r#""int64""#);
}
