//! Operation requests and binary arithmetic
//!
//! Error prevention: every key the UI can send is a variant of [`Operation`],
//! so dispatch is a single exhaustive `match` with no name lookups.

use std::fmt;

use crate::core::{CalcError, CalcResult};

/// Binary operator consuming the two topmost committed entries
///
/// `x` is the top of the stack (entered last) and `y` the entry below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `x + y`
    Add,
    /// `y - x`
    Subtract,
    /// `x * y`
    Multiply,
    /// `y / x`
    Divide,
}

impl BinaryOp {
    /// All binary operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Returns the dispatch name used by the UI
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Computes the result for top entry `x` and second entry `y`
    ///
    /// Division by an exact zero (either sign) fails with
    /// [`CalcError::InfiniteResult`]. A `NaN` divisor is not zero and simply
    /// produces `NaN`.
    pub fn apply(&self, x: f64, y: f64) -> CalcResult<f64> {
        match self {
            Self::Add => Ok(x + y),
            Self::Subtract => Ok(y - x),
            Self::Multiply => Ok(x * y),
            Self::Divide => {
                if x == 0.0 {
                    return Err(CalcError::InfiniteResult);
                }
                Ok(y / x)
            }
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A discrete request from the UI collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Append a character to the edit buffer, starting an edit if needed
    InsertChar(char),
    /// Remove the last edited character
    DeleteChar,
    /// Toggle the sign of the edited number, or negate the top entry
    ChangeSign,
    /// Enter a decimal point
    EnterDecimal,
    /// Enter the exponent marker
    EnterExponent,
    /// Commit the edit buffer, or duplicate the top entry
    Push,
    /// Discard the edit buffer, or remove the top entry
    Drop,
    /// Apply a binary operator
    Binary(BinaryOp),
}

impl Operation {
    /// Shorthand for [`Operation::Binary`] with [`BinaryOp::Add`]
    pub const ADD: Self = Self::Binary(BinaryOp::Add);
    /// Shorthand for [`Operation::Binary`] with [`BinaryOp::Subtract`]
    pub const SUBTRACT: Self = Self::Binary(BinaryOp::Subtract);
    /// Shorthand for [`Operation::Binary`] with [`BinaryOp::Multiply`]
    pub const MULTIPLY: Self = Self::Binary(BinaryOp::Multiply);
    /// Shorthand for [`Operation::Binary`] with [`BinaryOp::Divide`]
    pub const DIVIDE: Self = Self::Binary(BinaryOp::Divide);

    /// Returns the dispatch name used by the UI (`"enter"` for [`Operation::Push`])
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::InsertChar(_) => "insertChar",
            Self::DeleteChar => "deleteChar",
            Self::ChangeSign => "changeSign",
            Self::EnterDecimal => "enterDecimal",
            Self::EnterExponent => "enterExponent",
            Self::Push => "enter",
            Self::Drop => "drop",
            Self::Binary(op) => op.name(),
        }
    }

    /// Parses a dispatch name back into an operation
    ///
    /// `insertChar` needs its character payload; every other name ignores it.
    #[must_use]
    pub fn from_name(name: &str, payload: Option<char>) -> Option<Self> {
        let op = match name {
            "insertChar" => Self::InsertChar(payload?),
            "deleteChar" => Self::DeleteChar,
            "changeSign" => Self::ChangeSign,
            "enterDecimal" => Self::EnterDecimal,
            "enterExponent" => Self::EnterExponent,
            "enter" | "push" => Self::Push,
            "drop" => Self::Drop,
            other => Self::Binary(BinaryOp::ALL.into_iter().find(|op| op.name() == other)?),
        };
        Some(op)
    }
}

impl From<BinaryOp> for Operation {
    fn from(op: BinaryOp) -> Self {
        Self::Binary(op)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsertChar(c) => write!(f, "insertChar({c})"),
            other => f.write_str(other.name()),
        }
    }
}
