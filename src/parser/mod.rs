mod aws;
mod options;


pub use {
    aws::AwsParser,
    options::{ParserOptions, ParserOptionsBuilder, ParserOptionsBuilderError},
};

use {
    crate::{Policy, PolicyParserError},
    log::debug,
    std::{
        collections::HashMap,
        fmt::{Debug, Display, Formatter, Result as FmtResult},
        io::{self, BufWriter, Write},
        path::Path,
        str::FromStr,
    },
    tempfile::NamedTempFile,
};

/// Cloud providers with a policy language.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::Gcp => "gcp",
        }
    }
}

impl Display for Provider {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = PolicyParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aws" => Ok(Self::Aws),
            "azure" => Ok(Self::Azure),
            "gcp" => Ok(Self::Gcp),
            _ => Err(PolicyParserError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// Where a parser is in its lifecycle.
///
/// Construction decodes the input (or fails outright), leaving the parser `Decoded`. A call to
/// [`PolicyParser::parse`] moves it to `Parsed` or `Failed`; neither is left afterwards.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ParserState {
    Decoded,
    Parsed,
    Failed,
}

/// The capabilities shared by every provider's policy parser.
pub trait PolicyParser: Debug + Send {
    fn state(&self) -> ParserState;

    /// Parse and transform the decoded policy text.
    ///
    /// Parsing happens at most once: a parsed instance returns `Ok` again, and a failed one returns the same
    /// error again.
    fn parse(&mut self) -> Result<(), PolicyParserError>;

    /// The canonical policies, in statement order.
    ///
    /// Fails with [`PolicyParserError::NotParsed`] before parsing, or with the stored parse error after a failed
    /// parse.
    fn policy(&self) -> Result<&[Policy], PolicyParserError>;

    /// The canonical policies as a compact UTF-8 JSON array.
    fn to_json(&self) -> Result<Vec<u8>, PolicyParserError> {
        if self.state() != ParserState::Parsed {
            return Err(PolicyParserError::NotParsed);
        }

        Ok(serde_json::to_vec(self.policy()?).map_err(io::Error::from)?)
    }

    /// Write the canonical policies as JSON to a new file at `path`.
    ///
    /// An existing file is never overwritten, and a failed write leaves nothing at `path`.
    fn write_json(&self, path: &Path) -> Result<(), PolicyParserError> {
        if self.state() != ParserState::Parsed {
            return Err(PolicyParserError::NotParsed);
        }

        let policies = self.policy()?;
        write_new_file(path, |writer| {
            serde_json::to_writer(&mut *writer, policies).map_err(io::Error::from)?;
            writer.write_all(b"\n")
        })?;

        debug!("Wrote {} policies to {}", policies.len(), path.display());
        Ok(())
    }
}

/// Create `path` with the output of `write`.
///
/// The content goes to a temporary file in the same directory, which is renamed into place only once `write`
/// succeeds. The rename refuses to replace an existing file.
fn write_new_file<F>(path: &Path, write: F) -> Result<(), PolicyParserError>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }

    match temp_file.persist_noclobber(path) {
        Ok(_) => Ok(()),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
            Err(PolicyParserError::FileExists(path.to_path_buf()))
        }
        Err(e) => Err(e.error.into()),
    }
}

/// Creates a parser for one provider's policy language.
pub type ParserConstructor = fn(&str, &ParserOptions) -> Result<Box<dyn PolicyParser>, PolicyParserError>;

/// Maps providers to parser constructors.
///
/// The default registry knows only AWS. Parsers for other providers are registered by the crates that implement
/// them.
#[derive(Clone)]
pub struct ParserRegistry {
    constructors: HashMap<Provider, ParserConstructor>,
}

impl ParserRegistry {
    /// A registry with no providers.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register `constructor` for `provider`, returning the constructor it replaces.
    pub fn register(&mut self, provider: Provider, constructor: ParserConstructor) -> Option<ParserConstructor> {
        self.constructors.insert(provider, constructor)
    }

    #[inline]
    pub fn is_registered(&self, provider: Provider) -> bool {
        self.constructors.contains_key(&provider)
    }

    /// Create a parser for the provider named `provider` (`"aws"`, `"azure"`, or `"gcp"`).
    pub fn new_parser(
        &self,
        provider: &str,
        policy_text: &str,
        options: &ParserOptions,
    ) -> Result<Box<dyn PolicyParser>, PolicyParserError> {
        self.new_provider_parser(Provider::from_str(provider)?, policy_text, options)
    }

    pub fn new_provider_parser(
        &self,
        provider: Provider,
        policy_text: &str,
        options: &ParserOptions,
    ) -> Result<Box<dyn PolicyParser>, PolicyParserError> {
        match self.constructors.get(&provider) {
            Some(constructor) => constructor(policy_text, options),
            None => {
                debug!("No parser registered for {}", provider);
                Err(PolicyParserError::UnsupportedProvider(provider.to_string()))
            }
        }
    }
}

impl Debug for ParserRegistry {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_set().entries(self.constructors.keys()).finish()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Provider::Aws, AwsParser::boxed);
        registry
    }
}

/// Create a parser for the provider named `provider` using the default registry.
///
/// Set `escaped` when the policy text is percent-encoded; it is then decoded until it stops changing.
pub fn new_parser(provider: &str, policy_text: &str, escaped: bool) -> Result<Box<dyn PolicyParser>, PolicyParserError> {
    ParserRegistry::default().new_parser(provider, policy_text, &ParserOptions::with_escaped(escaped))
}
