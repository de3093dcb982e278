//! Error taxonomy for the investment engine
//!
//! Every failure the engine can report is local and recoverable: callers are
//! expected to match on the variant and translate it into a user-facing message.

use thiserror::Error;

/// Result alias used by all fallible engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed or out-of-range input, reported before computation begins
    #[error("Invalid value for `{field}`: {reason}")]
    Validation { field: String, reason: String },

    /// A ratio whose denominator is zero where a silent zero is not acceptable
    #[error("Division guard triggered: {context}")]
    DivisionGuard { context: String },

    /// The rate-of-return solver found no real root within its iteration bound
    #[error("No solution for {function}: {reason}")]
    NoSolution { function: String, reason: String },

    /// An intermediate amount fell outside the decimal range
    #[error("Arithmetic overflow: {context}")]
    Overflow { context: String },
}

impl EngineError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn division_guard(context: impl Into<String>) -> Self {
        EngineError::DivisionGuard {
            context: context.into(),
        }
    }

    pub fn no_solution(function: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::NoSolution {
            function: function.into(),
            reason: reason.into(),
        }
    }

    pub fn overflow(context: impl Into<String>) -> Self {
        EngineError::Overflow {
            context: context.into(),
        }
    }

    /// Field name for validation failures
    pub fn field(&self) -> Option<&str> {
        match self {
            EngineError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
