//! Source size selection.
//!
//! Walks the tokenized candidates in order and returns the size of the first one whose
//! media condition matches, or that has no media condition at all. Malformed candidates
//! are reported to the sink and skipped.
use crate::errors::{DiagnosticSink, ParseError};
use crate::length::is_valid_non_negative_length;
use crate::media::MediaEvaluator;
use crate::tokenizer::ComponentGroup;

/// Size used when no candidate applies
pub const DEFAULT_SIZE: &str = "100vw";

/// A candidate split into its media condition and size
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSize<'a> {
    /// Component values in front of the size. Empty when there is no media condition.
    pub media_tokens: &'a [String],
    /// The trailing size, already validated
    pub size: &'a str,
}

impl SourceSize<'_> {
    /// The media condition as a single string, or `None` when the candidate is unconditional
    #[must_use]
    pub fn condition(&self) -> Option<String> {
        if self.media_tokens.is_empty() {
            return None;
        }
        Some(self.media_tokens.join(" "))
    }
}

/// Splits a group into a media condition and a size. Returns an error when the group is empty
/// or its last component value is not a valid size.
pub fn parse_source_size(index: usize, group: &[String]) -> Result<SourceSize<'_>, ParseError> {
    let Some((size, media_tokens)) = group.split_last() else {
        return Err(ParseError::EmptyCandidate { index });
    };

    if !is_valid_non_negative_length(size) {
        return Err(ParseError::InvalidSize {
            index,
            token: size.clone(),
        });
    }

    Ok(SourceSize {
        media_tokens,
        size: size.as_str(),
    })
}

/// Selects the size from the tokenized candidates. Returns [`DEFAULT_SIZE`] when no
/// candidate applies.
pub fn select<E, S>(groups: &[ComponentGroup], evaluator: &E, sink: &S) -> String
where
    E: MediaEvaluator + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    log::trace!("select: {} candidate(s)", groups.len());

    for (index, group) in groups.iter().enumerate() {
        let source_size = match parse_source_size(index, group) {
            Ok(source_size) => source_size,
            Err(err) => {
                log::debug!("skipping candidate {index}: {err}");
                sink.parse_error(&err);
                continue;
            }
        };

        let Some(condition) = source_size.condition() else {
            let remaining = groups.len() - index - 1;
            if remaining > 0 {
                sink.parse_error(&ParseError::TrailingCandidates { index, remaining });
            }

            log::debug!("candidate {index} has no media condition, selecting {}", source_size.size);
            return source_size.size.to_string();
        };

        if evaluator.evaluate(&condition) {
            log::debug!("candidate {index} matches {condition:?}, selecting {}", source_size.size);
            return source_size.size.to_string();
        }

        log::debug!("candidate {index} does not match {condition:?}");
    }

    DEFAULT_SIZE.to_string()
}
