use {crate::decode::DEFAULT_MAX_DECODE_PASSES, derive_builder::Builder};

/// Options controlling how a parser treats its input.
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ParserOptions {
    /// Whether the policy text is percent-encoded (possibly more than once).
    #[builder(default)]
    escaped: bool,

    /// Upper bound on percent-decoding passes before the text is rejected.
    #[builder(default = "DEFAULT_MAX_DECODE_PASSES")]
    max_decode_passes: usize,
}

impl ParserOptions {
    #[inline]
    pub fn builder() -> ParserOptionsBuilder {
        ParserOptionsBuilder::default()
    }

    /// Default options with the given `escaped` flag.
    pub fn with_escaped(escaped: bool) -> Self {
        Self {
            escaped,
            ..Self::default()
        }
    }

    #[inline]
    pub fn escaped(&self) -> bool {
        self.escaped
    }

    #[inline]
    pub fn max_decode_passes(&self) -> usize {
        self.max_decode_passes
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            escaped: false,
            max_decode_passes: DEFAULT_MAX_DECODE_PASSES,
        }
    }
}

impl ParserOptionsBuilder {
    fn validate(&self) -> Result<(), ParserOptionsBuilderError> {
        if let Some(0) = self.max_decode_passes {
            return Err(ParserOptionsBuilderError::ValidationError("max_decode_passes must be at least 1".to_string()));
        }

        Ok(())
    }
}
