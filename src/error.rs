//! Error types for the indexing pass.

use thiserror::Error;

/// A syntax error reported by the upstream tokenizer.
///
/// The indexing pass does not parse JSON itself; when the tokenizer reports
/// malformed input, the error is propagated verbatim and the pass aborts.
/// Any index accumulated before the failure is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {line}:{column}")]
pub struct ParseError {
    /// Human-readable description of the syntax error.
    pub message: String,
    /// One-based line of the offending input.
    pub line: usize,
    /// One-based column of the offending input.
    pub column: usize,
}

impl ParseError {
    /// Creates a new upstream parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Failure of a [`build_index`](crate::build_index) pass.
///
/// Every variant is fatal: partial minified output or a partial index is not
/// a meaningful state, so nothing is retried or recovered inside the pass.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The tokenizer reported malformed input.
    #[error("upstream parse error: {0}")]
    Parse(#[from] ParseError),
    /// Writing to the minified-output sink failed.
    #[error("failed to write minified output")]
    Sink(#[source] std::io::Error),
    /// The event sequence closed a container that was never opened. This is
    /// a contract violation by the event source, not a property of the
    /// document.
    #[error("container close without a matching open at path {path:?}")]
    UnbalancedClose {
        /// Rendered path carried by the offending close event.
        path: String,
    },
}
