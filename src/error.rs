use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
    io,
    path::PathBuf,
};

/// Errors surfaced by a policy parser.
#[derive(Debug)]
pub enum PolicyParserError {
    /// The policy text was flagged as percent-encoded but could not be decoded.
    Decode(DecodeError),

    /// The (decoded) policy text does not conform to the policy grammar.
    Parse(ParseError),

    /// A query was made before a successful parse.
    NotParsed,

    /// The requested cloud provider has no registered parser.
    UnsupportedProvider(String),

    /// The JSON output target already exists.
    FileExists(PathBuf),

    /// The JSON output could not be written.
    Io(io::Error),
}

impl Display for PolicyParserError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Decode(e) => write!(f, "Error unescaping policy text: {}", e),
            Self::Parse(e) => write!(f, "Error parsing policy: {}", e),
            Self::NotParsed => f.write_str("No policies parsed yet"),
            Self::UnsupportedProvider(provider) => write!(f, "{} is not a supported cloud provider", provider),
            Self::FileExists(path) => write!(f, "File exists: {}", path.display()),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for PolicyParserError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DecodeError> for PolicyParserError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

impl From<ParseError> for PolicyParserError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<io::Error> for PolicyParserError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Percent-decoding failures.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// A `%` was not followed by two hexadecimal digits. `offset` is the byte offset of the `%` within the text
    /// being decoded on that pass.
    InvalidEscape {
        offset: usize,
        sequence: String,
    },

    /// The decoded bytes of the given pass (1-based) are not valid UTF-8.
    InvalidUtf8 {
        pass: usize,
    },

    /// The text was still changing after the maximum number of passes.
    NotConverged {
        passes: usize,
    },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidEscape {
                offset,
                sequence,
            } => write!(f, "Invalid escape {:?} at offset {}", sequence, offset),
            Self::InvalidUtf8 {
                pass,
            } => write!(f, "Decoded text is not valid UTF-8 on pass {}", pass),
            Self::NotConverged {
                passes,
            } => write!(f, "Decoding did not converge after {} passes", passes),
        }
    }
}

impl Error for DecodeError {}

/// The class of grammar failure.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ParseErrorCategory {
    /// Malformed JSON-like syntax.
    Syntax,

    /// Well-formed syntax carrying a value the policy grammar does not accept.
    Data,

    /// The input ended before the document was complete.
    Eof,

    /// The underlying reader failed.
    Io,
}

impl From<serde_json::error::Category> for ParseErrorCategory {
    fn from(category: serde_json::error::Category) -> Self {
        match category {
            serde_json::error::Category::Syntax => Self::Syntax,
            serde_json::error::Category::Data => Self::Data,
            serde_json::error::Category::Eof => Self::Eof,
            serde_json::error::Category::Io => Self::Io,
        }
    }
}

/// A grammar violation, with the offending token described in `message` and its 1-based position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    category: ParseErrorCategory,
    message: String,
    line: usize,
    column: usize,
}

impl ParseError {
    #[inline]
    pub fn category(&self) -> ParseErrorCategory {
        self.category
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json appends the position to its message; keep the two apart.
        let full = e.to_string();
        let suffix = format!(" at line {} column {}", e.line(), e.column());
        let message = full.strip_suffix(suffix.as_str()).unwrap_or(full.as_str()).to_string();

        Self {
            category: e.classify().into(),
            message,
            line: e.line(),
            column: e.column(),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{} at line {} column {}", self.message, self.line, self.column)
    }
}

impl Error for ParseError {}

#[cfg(test)]
mod tests {
    use {
        crate::{DecodeError, ParseError, ParseErrorCategory, PolicyParserError},
        pretty_assertions::{assert_eq, assert_ne},
        std::{error::Error, io, path::PathBuf},
    };

    #[test_log::test]
    fn test_display() {
        let _ = format!("{:?}", PolicyParserError::NotParsed);
        assert_eq!(PolicyParserError::NotParsed.to_string(), "No policies parsed yet");
        assert_eq!(
            PolicyParserError::UnsupportedProvider("oci".to_string()).to_string(),
            "oci is not a supported cloud provider"
        );
        assert_eq!(
            PolicyParserError::FileExists(PathBuf::from("/tmp/policies.json")).to_string(),
            "File exists: /tmp/policies.json"
        );

        let e = DecodeError::InvalidEscape {
            offset: 3,
            sequence: "%zz".to_string(),
        };
        assert_eq!(e.to_string(), r#"Invalid escape "%zz" at offset 3"#);
        assert_eq!(PolicyParserError::from(e).to_string(), r#"Error unescaping policy text: Invalid escape "%zz" at offset 3"#);

        assert_eq!(
            DecodeError::InvalidUtf8 {
                pass: 2
            }
            .to_string(),
            "Decoded text is not valid UTF-8 on pass 2"
        );
        assert_eq!(
            DecodeError::NotConverged {
                passes: 8
            }
            .to_string(),
            "Decoding did not converge after 8 passes"
        );
    }

    #[test_log::test]
    fn test_parse_error_from_json() {
        let e = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }").unwrap_err();
        let pe = ParseError::from(e);
        assert_eq!(pe.category(), ParseErrorCategory::Syntax);
        assert_eq!(pe.message(), "expected value");
        assert_eq!(pe.line(), 2);
        assert_eq!(pe.to_string(), format!("expected value at line 2 column {}", pe.column()));

        let e = serde_json::from_str::<serde_json::Value>("[1, 2").unwrap_err();
        let pe = ParseError::from(e);
        assert_eq!(pe.category(), ParseErrorCategory::Eof);
        assert_eq!(pe.clone(), pe);
    }

    #[test_log::test]
    fn test_source() {
        let e = PolicyParserError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(e.source().is_some());
        assert_eq!(e.to_string(), "I/O error: denied");
        assert!(PolicyParserError::NotParsed.source().is_none());
    }

    #[test_log::test]
    fn test_eq() {
        let e1a = DecodeError::NotConverged {
            passes: 1,
        };
        let e1b = DecodeError::NotConverged {
            passes: 1,
        };
        let e2 = DecodeError::InvalidUtf8 {
            pass: 1,
        };
        assert_eq!(e1a, e1b);
        assert_ne!(e1a, e2);
    }
}
