use {
    crate::serutil::NonEmptyList,
    serde::{
        de::{self, value::SeqAccessDeserializer, Deserializer, SeqAccess, Unexpected, Visitor},
        Deserialize, Serialize,
    },
    std::{
        convert::TryFrom,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// The primitive type of a condition value.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Int64,
    Bool,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int64 => "int64",
            Self::Bool => "bool",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A single condition value: a string, a signed 64-bit integer, or a boolean.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    String(String),
    Int64(i64),
    Bool(bool),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::String(_) => ValueType::String,
            Self::Int64(_) => ValueType::Int64,
            Self::Bool(_) => ValueType::Bool,
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        f.write_str("a string, integer, or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Value::Int64(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        match i64::try_from(v) {
            Ok(v) => Ok(Value::Int64(v)),
            Err(_) => Err(E::invalid_value(Unexpected::Unsigned(v), &self)),
        }
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Value::Bool(v))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// The value side of a condition key: a single value or a non-empty list of values.
///
/// The grammar does not require list elements to share a type; that is checked when the condition is
/// transformed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValueList {
    One(Value),
    List(Vec<Value>),
}

impl ValueList {
    /// The values in declaration order.
    pub fn values(&self) -> &[Value] {
        match self {
            Self::One(v) => std::slice::from_ref(v),
            Self::List(v) => v,
        }
    }
}

impl From<Value> for ValueList {
    fn from(v: Value) -> Self {
        Self::One(v)
    }
}

impl From<Vec<Value>> for ValueList {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

struct ValueListVisitor;

impl<'de> Visitor<'de> for ValueListVisitor {
    type Value = ValueList;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        f.write_str("a string, integer, boolean, or a non-empty list of them")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        ValueVisitor.visit_str(v).map(ValueList::One)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        ValueVisitor.visit_i64(v).map(ValueList::One)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        ValueVisitor.visit_u64(v).map(ValueList::One)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        ValueVisitor.visit_bool(v).map(ValueList::One)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
        let NonEmptyList(values) = NonEmptyList::<Value>::deserialize(SeqAccessDeserializer::new(access))?;
        Ok(ValueList::List(values))
    }
}

impl<'de> Deserialize<'de> for ValueList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueListVisitor)
    }
}
