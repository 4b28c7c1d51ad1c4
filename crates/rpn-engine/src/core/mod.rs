//! Core RPN engine: the edit buffer, the operand stack and their errors
//!
//! Every fallible stack operation validates before it mutates, so an `Err`
//! always leaves [`RpnStack::state`] exactly as it was.

pub mod edit;
mod operations;
pub mod snapshot;
pub mod stack;

pub use edit::{parse_number, EditBuffer};
pub use operations::{BinaryOp, Operation};
pub use snapshot::{Seed, Snapshot, StackEntry};
pub use stack::{EditState, RpnStack};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The committed stack holds fewer entries than the operation consumes
    #[error("TooFewArguments: expected {expected} argument(s)")]
    TooFewArguments {
        /// Minimum number of committed entries required
        expected: usize,
    },

    /// Division by an exact zero
    #[error("InfiniteResult: division by zero")]
    InfiniteResult,

    /// A key token that does not map to any keypad operation
    #[error("Unknown key: {0:?}")]
    UnknownKey(String),
}

impl CalcError {
    /// Create a too-few-arguments error for an operation needing `expected` entries
    #[must_use]
    pub const fn too_few(expected: usize) -> Self {
        Self::TooFewArguments { expected }
    }

    /// Create an unknown-key error
    #[must_use]
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey(key.into())
    }

    /// Short machine-readable name of the failure kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TooFewArguments { .. } => "TooFewArguments",
            Self::InfiniteResult => "InfiniteResult",
            Self::UnknownKey(_) => "UnknownKey",
        }
    }
}
