//! Error types for corpus assembly, construction and traversal.

use thiserror::Error;

/// Errors reported by the index.
///
/// Input errors are raised by [`Corpus::assemble`](crate::Corpus::assemble)
/// before any tree node exists, so a partially built tree is never observable.
/// Internal invariant violations during construction are not represented here;
/// they abort with a panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GstError {
    /// No documents were supplied.
    #[error("corpus is empty: at least one document is required")]
    EmptyCorpus,

    /// A document contains a character reserved as a terminator.
    #[error("document {document} contains terminator {terminator:?} at char offset {offset}")]
    TerminatorInContent {
        document: usize,
        offset: usize,
        terminator: char,
    },

    /// The type-context boundary counts are malformed.
    #[error("invalid type contexts: {0}")]
    InvalidTypeContexts(String),

    /// The corpus configuration cannot be applied to this input.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A build or walk observed its cancellation flag.
    #[error("operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, GstError>;

impl GstError {
    /// Returns true for errors caused by bad input rather than cancellation.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, GstError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = GstError::TerminatorInContent {
            document: 2,
            offset: 5,
            terminator: '$',
        };
        assert_eq!(
            err.to_string(),
            "document 2 contains terminator '$' at char offset 5"
        );
        assert_eq!(GstError::Cancelled.to_string(), "operation cancelled");
    }

    #[test]
    fn test_is_input_error() {
        assert!(GstError::EmptyCorpus.is_input_error());
        assert!(GstError::InvalidTypeContexts("x".into()).is_input_error());
        assert!(!GstError::Cancelled.is_input_error());
    }
}
