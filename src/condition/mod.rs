mod value;

#[cfg(test)]
mod tests;

pub use value::{Value, ValueList, ValueType};

use {
    log::debug,
    serde::{
        de::{self, Deserializer, MapAccess, Visitor},
        Deserialize,
    },
    std::fmt::{Formatter, Result as FmtResult},
};

/// One condition key and its value(s).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConditionKey {
    key: String,
    values: ValueList,
}

impl ConditionKey {
    pub fn new<K: Into<String>, V: Into<ValueList>>(key: K, values: V) -> Self {
        Self {
            key: key.into(),
            values: values.into(),
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn values(&self) -> &ValueList {
        &self.values
    }
}

/// A condition operation block, e.g. `"StringEquals": { "aws:username": "bob" }`.
///
/// Operation names are not checked against any catalog of known operators.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConditionOperation {
    operation: String,
    keys: Vec<ConditionKey>,
}

impl ConditionOperation {
    pub fn new<S: Into<String>>(operation: S, keys: Vec<ConditionKey>) -> Self {
        Self {
            operation: operation.into(),
            keys,
        }
    }

    #[inline]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    #[inline]
    pub fn keys(&self) -> &[ConditionKey] {
        &self.keys
    }
}

/// The value of a `Condition` element: operation blocks in declaration order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Condition {
    operations: Vec<ConditionOperation>,
}

impl Condition {
    pub fn new(operations: Vec<ConditionOperation>) -> Self {
        Self {
            operations,
        }
    }

    #[inline]
    pub fn operations(&self) -> &[ConditionOperation] {
        &self.operations
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

struct ConditionVisitor;

impl<'de> Visitor<'de> for ConditionVisitor {
    type Value = Condition;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        f.write_str("a non-empty map of condition operations")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut operations = Vec::new();

        while let Some(operation) = access.next_key::<String>()? {
            let ConditionKeys(keys) = access.next_value::<ConditionKeys>()?;
            operations.push(ConditionOperation::new(operation, keys));
        }

        if operations.is_empty() {
            return Err(de::Error::invalid_length(0, &self));
        }

        Ok(Condition::new(operations))
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ConditionVisitor)
    }
}

/// The key map inside a condition operation block.
struct ConditionKeys(Vec<ConditionKey>);

struct ConditionKeysVisitor;

impl<'de> Visitor<'de> for ConditionKeysVisitor {
    type Value = ConditionKeys;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        f.write_str("a non-empty map of condition keys to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut keys = Vec::new();

        while let Some(key) = access.next_key::<String>()? {
            let values = match access.next_value::<ValueList>() {
                Ok(values) => values,
                Err(e) => {
                    debug!("Failed to parse values for condition key {}: {}", key, e);
                    return Err(e);
                }
            };
            keys.push(ConditionKey::new(key, values));
        }

        if keys.is_empty() {
            return Err(de::Error::invalid_length(0, &self));
        }

        Ok(ConditionKeys(keys))
    }
}

impl<'de> Deserialize<'de> for ConditionKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ConditionKeysVisitor)
    }
}
