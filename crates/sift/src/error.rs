//! Error types for filter evaluation.
//!
//! Building a filter never fails. These errors surface when a built filter is
//! evaluated against records whose attributes don't line up with it.

use thiserror::Error;

/// Errors that can occur when evaluating a filter against records.
#[derive(Debug, Error)]
pub enum SiftError {
    /// The record has no attribute with this name.
    #[error("unknown attribute '{attribute}'")]
    UnknownAttribute { attribute: String },

    /// The comparison value and the record value are of different types.
    #[error("type mismatch on '{attribute}': filter expects {expected}, record has {actual}")]
    TypeMismatch {
        attribute: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Operator is not valid for the given value type.
    #[error("operator '{op}' is not valid for {value_type} values")]
    InvalidOperator {
        op: &'static str,
        value_type: &'static str,
    },

    /// A like pattern could not be compiled.
    #[error("invalid like pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;
