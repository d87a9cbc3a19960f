//! Unified error types for tensor construction, access and parsing
//!
//! Every fallible operation in the Tensa stack reports one of the variants of
//! [`TensorError`]. Errors are synchronous and are never recovered internally:
//! a failing builder commit, parse or function call produces no tensor at all.
//!
//! # Examples
//!
//! ```
//! use tensa_core::error::{TensorError, TensorResult};
//!
//! fn require_rank(rank: usize) -> TensorResult<()> {
//!     if rank > 8 {
//!         return Err(TensorError::invalid_argument(format!("rank {} is too large", rank)));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_rank(2).is_ok());
//! assert!(matches!(require_rank(9), Err(TensorError::InvalidArgument { .. })));
//! ```

use thiserror::Error;

/// Top-level error type for all tensor operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    /// A tensor type could not be constructed (mixed dimension kinds, duplicate names, bad names)
    #[error("Type construction error: {reason}")]
    TypeConstruction { reason: String },

    /// An argument does not fit the tensor it is applied to
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A label does not match the kind of its dimension
    #[error("Type mismatch: label '{label}' is not valid for {kind} dimension '{dimension}'")]
    TypeMismatch {
        dimension: String,
        kind: &'static str,
        label: String,
    },

    /// An indexed label lies outside the dimension size
    #[error("Index out of bounds: label {label} in dimension '{dimension}' of size {size}")]
    IndexOutOfBounds {
        dimension: String,
        label: usize,
        size: usize,
    },

    /// Text that does not follow the tensor or type-spec grammar
    #[error("Format error in '{input}': {reason}")]
    Format { input: String, reason: String },

    /// An accessor that is not valid for the tensor's current shape
    #[error("State error: {reason}")]
    State { reason: String },
}

/// Result type alias for tensor operations
pub type TensorResult<T> = Result<T, TensorError>;

// Convenience constructors for common error patterns
impl TensorError {
    /// Create a type construction error
    pub fn type_construction(reason: impl Into<String>) -> Self {
        TensorError::TypeConstruction {
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        TensorError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create a format error for the given input text
    pub fn format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        TensorError::Format {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a state error
    pub fn state(reason: impl Into<String>) -> Self {
        TensorError::State {
            reason: reason.into(),
        }
    }

    /// Whether this error was raised by the text codec
    pub fn is_format(&self) -> bool {
        matches!(self, TensorError::Format { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_message() {
        let err = TensorError::TypeMismatch {
            dimension: "x".to_string(),
            kind: "indexed",
            label: "a".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch: label 'a' is not valid for indexed dimension 'x'"
        );
    }

    #[test]
    fn test_index_out_of_bounds_message() {
        let err = TensorError::IndexOutOfBounds {
            dimension: "y".to_string(),
            label: 4,
            size: 3,
        };
        assert_eq!(
            err.to_string(),
            "Index out of bounds: label 4 in dimension 'y' of size 3"
        );
    }

    #[test]
    fn test_format_error() {
        let err = TensorError::format("{x", "unterminated value body");
        assert!(err.is_format());
        assert_eq!(
            err.to_string(),
            "Format error in '{x': unterminated value body"
        );
    }

    #[test]
    fn test_state_error_is_not_format() {
        assert!(!TensorError::state("not dimensionless").is_format());
    }
}
