use {
    crate::{AnyOrList, Condition, Principal},
    serde::{
        de::{self, Deserializer, MapAccess, Visitor},
        Deserialize,
    },
    std::fmt::{Formatter, Result as FmtResult},
};

const STATEMENT_ELEMENTS: &[&str] = &[
    "Sid",
    "Effect",
    "Principal",
    "NotPrincipal",
    "Action",
    "NotAction",
    "Resource",
    "NotResource",
    "Condition",
];

/// A single property of a statement.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Element {
    Sid(String),
    Effect(String),
    Principal(Principal),
    NotPrincipal(Principal),
    Action(AnyOrList),
    NotAction(AnyOrList),
    Resource(AnyOrList),
    NotResource(AnyOrList),
    Condition(Condition),
}

impl Element {
    /// The policy keyword naming this element.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Sid(_) => "Sid",
            Self::Effect(_) => "Effect",
            Self::Principal(_) => "Principal",
            Self::NotPrincipal(_) => "NotPrincipal",
            Self::Action(_) => "Action",
            Self::NotAction(_) => "NotAction",
            Self::Resource(_) => "Resource",
            Self::NotResource(_) => "NotResource",
            Self::Condition(_) => "Condition",
        }
    }
}

/// A statement: its elements in declaration order.
///
/// Elements are not required to be unique; a repeated element is kept alongside the earlier one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Statement {
    elements: Vec<Element>,
}

impl Statement {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
        }
    }

    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The statement id, if present. When repeated, the last one wins.
    pub fn sid(&self) -> Option<&str> {
        self.elements.iter().rev().find_map(|e| match e {
            Element::Sid(sid) => Some(sid.as_str()),
            _ => None,
        })
    }
}

impl From<Vec<Element>> for Statement {
    fn from(elements: Vec<Element>) -> Self {
        Self::new(elements)
    }
}

struct StatementVisitor;

impl<'de> Visitor<'de> for StatementVisitor {
    type Value = Statement;

    fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
        formatter.write_str("a map of statement properties")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Statement, A::Error> {
        let mut elements = Vec::new();

        while let Some(key) = access.next_key::<String>()? {
            let element = match key.as_str() {
                "Sid" => Element::Sid(access.next_value::<String>()?),
                "Effect" => Element::Effect(access.next_value::<String>()?),
                "Principal" => Element::Principal(access.next_value::<Principal>()?),
                "NotPrincipal" => Element::NotPrincipal(access.next_value::<Principal>()?),
                "Action" => Element::Action(access.next_value::<AnyOrList>()?),
                "NotAction" => Element::NotAction(access.next_value::<AnyOrList>()?),
                "Resource" => Element::Resource(access.next_value::<AnyOrList>()?),
                "NotResource" => Element::NotResource(access.next_value::<AnyOrList>()?),
                "Condition" => Element::Condition(access.next_value::<Condition>()?),
                _ => return Err(de::Error::unknown_field(&key, STATEMENT_ELEMENTS)),
            };

            elements.push(element);
        }

        if elements.is_empty() {
            return Err(de::Error::invalid_length(0, &self));
        }

        Ok(Statement::new(elements))
    }
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StatementVisitor)
    }
}
