use {
    crate::{display_json, ValueType},
    derive_builder::Builder,
    serde::{Deserialize, Serialize},
};

/// The values of one condition key, all of the same primitive type.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConditionValues {
    String(Vec<String>),
    Int64(Vec<i64>),
    Bool(Vec<bool>),
}

impl ConditionValues {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::String(_) => ValueType::String,
            Self::Int64(_) => ValueType::Int64,
            Self::Bool(_) => ValueType::Bool,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::String(v) => v.len(),
            Self::Int64(v) => v.len(),
            Self::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<String>> for ConditionValues {
    fn from(v: Vec<String>) -> Self {
        Self::String(v)
    }
}

impl From<Vec<&str>> for ConditionValues {
    fn from(v: Vec<&str>) -> Self {
        Self::String(v.into_iter().map(String::from).collect())
    }
}

impl From<Vec<i64>> for ConditionValues {
    fn from(v: Vec<i64>) -> Self {
        Self::Int64(v)
    }
}

impl From<Vec<bool>> for ConditionValues {
    fn from(v: Vec<bool>) -> Self {
        Self::Bool(v)
    }
}

/// A canonical condition: one operation and its keys, with parallel value and type lists.
///
/// `key`, `value`, and `value_type` always have the same length; `value_type[i]` is the type of every element
/// of `value[i]`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PolicyCondition {
    #[serde(rename = "Operation")]
    operation: String,

    #[serde(rename = "Key")]
    key: Vec<String>,

    #[serde(rename = "Value")]
    value: Vec<ConditionValues>,

    #[serde(rename = "Type")]
    value_type: Vec<ValueType>,
}

impl PolicyCondition {
    pub fn new<S: Into<String>>(operation: S) -> Self {
        Self {
            operation: operation.into(),
            key: Vec::new(),
            value: Vec::new(),
            value_type: Vec::new(),
        }
    }

    /// Append a key and its values. The recorded type is taken from the values.
    pub fn push<K: Into<String>, V: Into<ConditionValues>>(&mut self, key: K, values: V) {
        let values = values.into();
        self.key.push(key.into());
        self.value_type.push(values.value_type());
        self.value.push(values);
    }

    /// Builder-style variant of [`PolicyCondition::push`].
    pub fn with<K: Into<String>, V: Into<ConditionValues>>(mut self, key: K, values: V) -> Self {
        self.push(key, values);
        self
    }

    #[inline]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    #[inline]
    pub fn keys(&self) -> &[String] {
        &self.key
    }

    #[inline]
    pub fn values(&self) -> &[ConditionValues] {
        &self.value
    }

    #[inline]
    pub fn types(&self) -> &[ValueType] {
        &self.value_type
    }

    /// Iterate over `(key, values)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConditionValues)> {
        self.key.iter().map(String::as_str).zip(self.value.iter())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.key.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

/// A canonical, provider-neutral policy record. One is produced for each statement of a policy document.
///
/// Patterns in `actions`, `not_actions`, `resources`, `not_resources`, `subjects`, and `not_subjects` use `<.*>`
/// wherever the source document had a `*` wildcard.
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Policy {
    /// `<document id>:<statement index>`; the document id is empty when the document has none.
    #[builder(setter(into))]
    pub(crate) id: String,

    /// The document's `Version` text, or empty.
    #[builder(setter(into), default)]
    pub(crate) version: String,

    #[builder(default)]
    pub(crate) allowed: bool,

    #[builder(setter(into), default)]
    pub(crate) actions: Vec<String>,

    #[builder(setter(into), default)]
    pub(crate) not_actions: Vec<String>,

    #[builder(setter(into), default)]
    pub(crate) resources: Vec<String>,

    #[builder(setter(into), default)]
    pub(crate) not_resources: Vec<String>,

    #[builder(setter(into), default)]
    pub(crate) subjects: Vec<String>,

    #[builder(setter(into), default)]
    pub(crate) not_subjects: Vec<String>,

    #[builder(setter(into), default)]
    pub(crate) condition: Vec<PolicyCondition>,
}

impl Policy {
    #[inline]
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[inline]
    pub fn allowed(&self) -> bool {
        self.allowed
    }

    #[inline]
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    #[inline]
    pub fn not_actions(&self) -> &[String] {
        &self.not_actions
    }

    #[inline]
    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    #[inline]
    pub fn not_resources(&self) -> &[String] {
        &self.not_resources
    }

    #[inline]
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    #[inline]
    pub fn not_subjects(&self) -> &[String] {
        &self.not_subjects
    }

    #[inline]
    pub fn condition(&self) -> &[PolicyCondition] {
        &self.condition
    }
}

display_json!(Policy);
