//! Parsing and evaluation of the `sizes` attribute of `img` and `source` elements.
//!
//! The attribute is a comma separated list of candidates, each a media condition followed by
//! a length, optionally ending with a length without a condition:
//!
//! ```text
//! (max-width: 600px) 100vw, (max-width: 1200px) 50vw, 600px
//! ```
//!
//! The first candidate whose condition matches decides the size. When nothing matches, the
//! size is `100vw`.
//!
//! ```
//! use sizes_css::{select_size, media::Viewport, errors::NullSink};
//!
//! let viewport = Viewport::new(800.0, 600.0);
//! let size = select_size(Some("(max-width: 600px) 100vw, 50vw"), &viewport, &NullSink);
//! assert_eq!(size, "50vw");
//! ```
use crate::errors::{DiagnosticSink, NullSink, ParseError};
use crate::media::MediaEvaluator;
use crate::parser_config::SizesConfig;
use crate::tokenizer::ComponentGroup;

pub mod errors;
pub mod length;
pub mod media;
pub mod parser_config;
pub mod selector;
pub mod tokenizer;

pub use crate::length::is_valid_non_negative_length;
pub use crate::selector::{select, DEFAULT_SIZE};
pub use crate::tokenizer::{tokenize, tokenize_with};

/// Selects the size for an attribute value with the default configuration. A missing
/// attribute is treated as an empty one.
pub fn select_size<E, S>(input: Option<&str>, evaluator: &E, sink: &S) -> String
where
    E: MediaEvaluator + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    select(&tokenize(input.unwrap_or_default()), evaluator, sink)
}

/// Bundles a configuration and a diagnostic sink so the same settings can be applied to many
/// attribute values.
pub struct SizesParser<S: DiagnosticSink = NullSink> {
    /// The parser configuration as given
    config: SizesConfig,
    sink: S,
}

impl Default for SizesParser<NullSink> {
    fn default() -> Self {
        Self::new(SizesConfig::default())
    }
}

impl SizesParser<NullSink> {
    /// Creates a parser that drops all parse errors
    #[must_use]
    pub fn new(config: SizesConfig) -> Self {
        Self::with_sink(config, NullSink)
    }
}

impl<S: DiagnosticSink> SizesParser<S> {
    /// Creates a parser that reports parse errors to the given sink
    pub fn with_sink(config: SizesConfig, sink: S) -> Self {
        Self { config, sink }
    }

    #[must_use]
    pub fn config(&self) -> &SizesConfig {
        &self.config
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Splits the attribute value into candidate groups
    #[must_use]
    pub fn tokenize(&self, input: &str) -> Vec<ComponentGroup> {
        tokenize_with(input, &self.config)
    }

    /// Selects the size for the attribute value
    pub fn select<E: MediaEvaluator + ?Sized>(&self, input: Option<&str>, evaluator: &E) -> String {
        let groups = self.tokenize(input.unwrap_or_default());

        match self.config.source.as_deref() {
            Some(source) => {
                let sink = |error: &ParseError| self.sink.parse_error_from(source, error);
                let size = select(&groups, evaluator, &sink);
                log::debug!("selected size {size} for {source}");
                size
            }
            None => select(&groups, evaluator, &self.sink),
        }
    }
}
