use {
    crate::serutil::NonEmptyList,
    serde::{
        de::{self, value::SeqAccessDeserializer, Deserializer, SeqAccess, Visitor},
        Deserialize,
    },
    std::fmt::{Formatter, Result as FmtResult},
};

/// One entry of an any-or-list array: either the wildcard `"*"` or a literal string.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Item {
    Any,
    One(String),
}

impl Item {
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl From<&str> for Item {
    fn from(v: &str) -> Self {
        if v == "*" {
            Self::Any
        } else {
            Self::One(v.to_string())
        }
    }
}

struct ItemVisitor;

impl<'de> Visitor<'de> for ItemVisitor {
    type Value = Item;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        f.write_str("a string or \"*\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Item::from(v))
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ItemVisitor)
    }
}

/// The value of an `Action`, `NotAction`, `Resource`, or `NotResource` element, or of a principal map entry:
/// a bare wildcard, a single string, or a non-empty list of items.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AnyOrList {
    Any,
    One(String),
    List(Vec<Item>),
}

impl AnyOrList {
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// The items in declaration order. A bare value is a single item.
    pub fn to_vec(&self) -> Vec<Item> {
        match self {
            Self::Any => vec![Item::Any],
            Self::One(v) => vec![Item::One(v.clone())],
            Self::List(items) => items.clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Any | Self::One(_) => 1,
            Self::List(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for AnyOrList {
    fn from(v: &str) -> Self {
        match Item::from(v) {
            Item::Any => Self::Any,
            Item::One(v) => Self::One(v),
        }
    }
}

impl From<Vec<Item>> for AnyOrList {
    fn from(items: Vec<Item>) -> Self {
        Self::List(items)
    }
}

struct AnyOrListVisitor;

impl<'de> Visitor<'de> for AnyOrListVisitor {
    type Value = AnyOrList;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        f.write_str("\"*\", a string, or a non-empty list of strings")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(AnyOrList::from(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
        let NonEmptyList(items) = NonEmptyList::<Item>::deserialize(SeqAccessDeserializer::new(access))?;
        Ok(AnyOrList::List(items))
    }
}

impl<'de> Deserialize<'de> for AnyOrList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AnyOrListVisitor)
    }
}
