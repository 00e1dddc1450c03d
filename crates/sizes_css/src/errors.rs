//! Parse errors raised while selecting a source size, and the sinks that receive them.
//!
//! None of these errors are fatal. The selector reports them and moves on to the next
//! candidate, so they only ever end up in a [`DiagnosticSink`].
use std::cell::RefCell;
use thiserror::Error;

/// A malformed or skipped candidate in a sizes list
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("candidate {index} is empty")]
    EmptyCandidate { index: usize },

    #[error("candidate {index} does not end in a valid non-negative length: {token:?}")]
    InvalidSize { index: usize, token: String },

    #[error("candidate {index} has no media condition, ignoring {remaining} candidate(s) after it")]
    TrailingCandidates { index: usize, remaining: usize },
}

impl ParseError {
    /// Index of the candidate (comma separated group) the error belongs to
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            ParseError::EmptyCandidate { index }
            | ParseError::InvalidSize { index, .. }
            | ParseError::TrailingCandidates { index, .. } => *index,
        }
    }
}

/// Receives parse errors as they are found. Hosts plug in their own logging facility here.
pub trait DiagnosticSink {
    fn parse_error(&self, error: &ParseError);

    /// Reports an error for an attribute that came from `source` (an element, file or url).
    /// Sinks that don't track origins report it like any other error.
    fn parse_error_from(&self, source: &str, error: &ParseError) {
        let _ = source;
        self.parse_error(error);
    }
}

/// Sink that drops every error
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn parse_error(&self, _error: &ParseError) {}
}

/// Sink that forwards every error to the `log` facade
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn parse_error(&self, error: &ParseError) {
        log::warn!("sizes parse error: {error}");
    }

    fn parse_error_from(&self, source: &str, error: &ParseError) {
        log::warn!("sizes parse error in {source}: {error}");
    }
}

/// Sink that keeps every error it receives, in order
#[derive(Debug, Default)]
pub struct CollectingSink {
    errors: RefCell<Vec<ParseError>>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the errors collected so far
    #[must_use]
    pub fn errors(&self) -> Vec<ParseError> {
        self.errors.borrow().clone()
    }

    /// Takes the collected errors out of the sink, leaving it empty
    pub fn take(&self) -> Vec<ParseError> {
        self.errors.take()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn parse_error(&self, error: &ParseError) {
        self.errors.borrow_mut().push(error.clone());
    }
}

impl<F> DiagnosticSink for F
where
    F: Fn(&ParseError),
{
    fn parse_error(&self, error: &ParseError) {
        self(error);
    }
}
