use std::fmt::{Display, Formatter, Result as FmtResult};

/// The effect of a statement.
///
/// Raw effect text is not validated by the grammar; anything other than a case-insensitive `allow` denies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    pub fn from_text(text: &str) -> Self {
        if text.to_lowercase() == "allow" {
            Self::Allow
        } else {
            Self::Deny
        }
    }

    #[inline]
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl Default for Effect {
    fn default() -> Self {
        Self::Deny
    }
}

impl Display for Effect {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Allow => f.write_str("Allow"),
            Self::Deny => f.write_str("Deny"),
        }
    }
}
