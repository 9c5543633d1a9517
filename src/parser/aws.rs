use {
    super::{ParserOptions, ParserState, PolicyParser},
    crate::{decode::decode, transform, Document, ParseError, Policy, PolicyParserError},
    log::{debug, error},
};

#[derive(Debug)]
enum State {
    Decoded(String),
    Parsed(Vec<Policy>),
    Failed(ParseError),
}

/// Parser for AWS IAM policy documents.
#[derive(Debug)]
pub struct AwsParser {
    state: State,
}

impl AwsParser {
    /// Create a parser over `policy_text`, percent-decoding it first if `escaped` is set.
    pub fn new(policy_text: &str, escaped: bool) -> Result<Self, PolicyParserError> {
        Self::with_options(policy_text, &ParserOptions::with_escaped(escaped))
    }

    pub fn with_options(policy_text: &str, options: &ParserOptions) -> Result<Self, PolicyParserError> {
        let text = if options.escaped() {
            decode(policy_text, options.max_decode_passes())?
        } else {
            policy_text.to_string()
        };

        Ok(Self {
            state: State::Decoded(text),
        })
    }

    pub(super) fn boxed(
        policy_text: &str,
        options: &ParserOptions,
    ) -> Result<Box<dyn PolicyParser>, PolicyParserError> {
        Ok(Box::new(Self::with_options(policy_text, options)?))
    }
}

impl PolicyParser for AwsParser {
    fn state(&self) -> ParserState {
        match self.state {
            State::Decoded(_) => ParserState::Decoded,
            State::Parsed(_) => ParserState::Parsed,
            State::Failed(_) => ParserState::Failed,
        }
    }

    fn parse(&mut self) -> Result<(), PolicyParserError> {
        let text = match &self.state {
            State::Decoded(text) => text,
            State::Parsed(_) => return Ok(()),
            State::Failed(e) => return Err(e.clone().into()),
        };

        match Document::parse(text) {
            Ok(document) => {
                let policies = transform(&document);
                debug!("Parsed AWS policy with {} statements", policies.len());
                self.state = State::Parsed(policies);
                Ok(())
            }
            Err(e) => {
                error!("Failed to parse AWS policy: {}", e);
                self.state = State::Failed(e.clone());
                Err(e.into())
            }
        }
    }

    fn policy(&self) -> Result<&[Policy], PolicyParserError> {
        match &self.state {
            State::Decoded(_) => Err(PolicyParserError::NotParsed),
            State::Parsed(policies) => Ok(policies),
            State::Failed(e) => Err(e.clone().into()),
        }
    }
}
