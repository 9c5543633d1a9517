use {
    crate::AnyOrList,
    log::debug,
    serde::{
        de::{self, Deserializer, MapAccess, Unexpected, Visitor},
        Deserialize,
    },
    std::fmt::{Display, Formatter, Result as FmtResult},
};

const PRINCIPAL_KINDS: &[&str] = &["AWS", "Federated", "CanonicalUser", "Service"];

/// The kind of identity named by a principal map entry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PrincipalKind {
    Aws,
    Federated,
    CanonicalUser,
    Service,
}

impl PrincipalKind {
    /// Look up a principal kind by its policy keyword. Keywords are case-sensitive.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "AWS" => Some(Self::Aws),
            "Federated" => Some(Self::Federated),
            "CanonicalUser" => Some(Self::CanonicalUser),
            "Service" => Some(Self::Service),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::Federated => "Federated",
            Self::CanonicalUser => "CanonicalUser",
            Self::Service => "Service",
        }
    }
}

impl Display for PrincipalKind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.keyword())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrincipalEntry {
    kind: PrincipalKind,
    value: AnyOrList,
}

impl PrincipalEntry {
    pub fn new(kind: PrincipalKind, value: AnyOrList) -> Self {
        Self {
            kind,
            value,
        }
    }

    #[inline]
    pub fn kind(&self) -> PrincipalKind {
        self.kind
    }

    #[inline]
    pub fn value(&self) -> &AnyOrList {
        &self.value
    }
}

/// The value of a `Principal` or `NotPrincipal` element.
///
/// A principal map keeps its entries in declaration order, and a kind may appear more than once.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Principal {
    Any,
    Map(Vec<PrincipalEntry>),
}

impl Principal {
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// The map entries, or an empty slice for the wildcard principal.
    pub fn entries(&self) -> &[PrincipalEntry] {
        match self {
            Self::Any => &[],
            Self::Map(entries) => entries,
        }
    }
}

impl From<Vec<PrincipalEntry>> for Principal {
    fn from(entries: Vec<PrincipalEntry>) -> Self {
        Self::Map(entries)
    }
}

struct PrincipalVisitor;

impl<'de> Visitor<'de> for PrincipalVisitor {
    type Value = Principal;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        f.write_str("map of principal types to values or \"*\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v == "*" {
            Ok(Principal::Any)
        } else {
            Err(E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::new();

        while let Some(key) = access.next_key::<String>()? {
            let kind = match PrincipalKind::from_keyword(&key) {
                Some(kind) => kind,
                None => {
                    debug!("Unknown principal type: {}", key);
                    return Err(de::Error::unknown_field(&key, PRINCIPAL_KINDS));
                }
            };

            entries.push(PrincipalEntry::new(kind, access.next_value::<AnyOrList>()?));
        }

        if entries.is_empty() {
            return Err(de::Error::invalid_length(0, &self));
        }

        Ok(Principal::Map(entries))
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PrincipalVisitor)
    }
}
