use {
    crate::{
        AnyOrList, Condition, ConditionValues, Document, Effect, Element, Item, Policy, PolicyCondition, Principal,
        Statement, Value, ValueList,
    },
    log::debug,
};

/// The canonical stand-in for a policy `*` wildcard.
pub const WILDCARD_MARKER: &str = "<.*>";

/// Turn a parsed document into canonical policies, one per statement, in statement order.
pub fn transform(document: &Document) -> Vec<Policy> {
    let id = document.id().unwrap_or("");
    let version = document.version().unwrap_or("");

    document
        .statement()
        .iter()
        .enumerate()
        .map(|(index, statement)| transform_statement(id, version, index, statement))
        .collect()
}

fn transform_statement(document_id: &str, version: &str, index: usize, statement: &Statement) -> Policy {
    let mut policy = Policy {
        id: format!("{}:{}", document_id, index),
        version: version.to_string(),
        ..Default::default()
    };

    // A repeated element replaces what an earlier one set.
    for element in statement.elements() {
        match element {
            Element::Sid(_) => (),
            Element::Effect(effect) => policy.allowed = Effect::from_text(effect).is_allow(),
            Element::Action(list) => policy.actions = patterns(list),
            Element::NotAction(list) => policy.not_actions = patterns(list),
            Element::Resource(list) => policy.resources = patterns(list),
            Element::NotResource(list) => policy.not_resources = patterns(list),
            Element::Principal(principal) => policy.subjects = subjects(principal),
            Element::NotPrincipal(principal) => policy.not_subjects = subjects(principal),
            Element::Condition(condition) => policy.condition = conditions(condition),
        }
    }

    policy
}

/// Replace every `*` in `value` with the wildcard marker.
///
/// Text that already contains the marker is not escaped, so a literal `<.*>` in the input is indistinguishable
/// from a translated wildcard.
pub fn substitute_wildcards(value: &str) -> String {
    value.replace('*', WILDCARD_MARKER)
}

fn pattern(item: &Item) -> String {
    match item {
        Item::Any => WILDCARD_MARKER.to_string(),
        Item::One(value) => substitute_wildcards(value),
    }
}

fn patterns(list: &AnyOrList) -> Vec<String> {
    match list {
        AnyOrList::Any => vec![WILDCARD_MARKER.to_string()],
        AnyOrList::One(value) => vec![substitute_wildcards(value)],
        AnyOrList::List(items) => items.iter().map(pattern).collect(),
    }
}

fn subjects(principal: &Principal) -> Vec<String> {
    match principal {
        Principal::Any => vec![WILDCARD_MARKER.to_string()],
        Principal::Map(entries) => entries.iter().flat_map(|entry| patterns(entry.value())).collect(),
    }
}

fn conditions(condition: &Condition) -> Vec<PolicyCondition> {
    let mut result = Vec::with_capacity(condition.len());

    for operation in condition.operations() {
        if operation.operation().is_empty() {
            debug!("Dropping condition operation with an empty name");
            continue;
        }

        let mut policy_condition = PolicyCondition::new(operation.operation());

        for key in operation.keys() {
            if key.key().is_empty() {
                debug!("Dropping empty condition key under {}", operation.operation());
                continue;
            }

            match condition_values(key.values()) {
                Some(values) => policy_condition.push(key.key(), values),
                None => debug!("Dropping condition key {} under {}: mixed value types", key.key(), operation.operation()),
            }
        }

        result.push(policy_condition);
    }

    result
}

/// Collect a value list into a single-typed list, or `None` if its elements do not all share one type.
fn condition_values(values: &ValueList) -> Option<ConditionValues> {
    let values = values.values();
    let first = values.first()?;

    match first {
        Value::String(_) => values
            .iter()
            .map(|v| match v {
                Value::String(s) => Some(s.clone()),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(ConditionValues::String),
        Value::Int64(_) => values
            .iter()
            .map(|v| match v {
                Value::Int64(i) => Some(*i),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(ConditionValues::Int64),
        Value::Bool(_) => values
            .iter()
            .map(|v| match v {
                Value::Bool(b) => Some(*b),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(ConditionValues::Bool),
    }
}
