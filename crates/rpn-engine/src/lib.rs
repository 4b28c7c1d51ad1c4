//! RPN Engine - reverse-Polish-notation calculator core
//!
//! A numeric edit buffer plus an operand stack, driven by discrete key
//! operations. Hosts dispatch one [`Operation`](core::Operation) per input
//! event and read back a [`Snapshot`](core::Snapshot) after each call.
//!
//! # Principles
//!
//! - **Error prevention**: operations are an exhaustive enum and "editing" is
//!   an explicit state, so invalid dispatches cannot be expressed
//! - **Stop the line**: `TooFewArguments` and `InfiniteResult` are raised
//!   before any mutation, leaving the stack exactly as it was
//! - **Balanced testing**: the same driver checks run against the
//!   bare engine and the session
//!
//! # Example
//!
//! ```rust
//! use rpn_engine::prelude::*;
//!
//! let mut rpn = RpnStack::new();
//! rpn.insert_char('1');
//! rpn.push().unwrap();
//! rpn.insert_char('2');
//! rpn.add().unwrap();
//! assert_eq!(rpn.state().display(), "3");
//!
//! // Division by zero is rejected and nothing changes
//! let mut session = Session::with_seed(vec![0.0, 1.0]);
//! assert_eq!(session.press(Operation::DIVIDE), Err(CalcError::InfiniteResult));
//! assert_eq!(session.display(), "0");
//! ```

#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;
pub mod keypad;
pub mod session;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::{
        parse_number, BinaryOp, CalcError, CalcResult, EditBuffer, EditState, Operation, RpnStack,
        Seed, Snapshot, StackEntry,
    };
    pub use crate::driver::CalculatorDriver;
    pub use crate::keypad::{parse_line, parse_token, Keypad, KeypadButton};
    pub use crate::session::Session;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut session = Session::new();
        session.press_line("6 enter 7 *").unwrap();
        assert_eq!(session.display(), "42");
    }

    #[test]
    fn test_scenario_a_delete_char() {
        let mut rpn = RpnStack::new();
        "3.14".chars().for_each(|c| rpn.insert_char(c));
        rpn.delete_char();
        assert_eq!(rpn.state().display(), "3.1");
    }

    #[test]
    fn test_scenario_b_change_sign() {
        let mut rpn = RpnStack::new();
        "12345".chars().for_each(|c| rpn.insert_char(c));
        rpn.change_sign().unwrap();
        assert_eq!(rpn.state().display(), "-12345");
        rpn.change_sign().unwrap();
        assert_eq!(rpn.state().display(), "+12345");
    }

    #[test]
    fn test_scenario_c_divide_by_zero() {
        let mut rpn = RpnStack::new();
        rpn.insert_char('1');
        rpn.push().unwrap();
        rpn.insert_char('0');
        rpn.push().unwrap();
        assert_eq!(rpn.divide(), Err(CalcError::InfiniteResult));
        assert_eq!(rpn.state(), [0.0, 1.0].into_iter().collect::<Snapshot>());
    }

    #[test]
    fn test_scenario_d_add_commits_edit() {
        let mut rpn = RpnStack::new();
        rpn.insert_char('1');
        rpn.push().unwrap();
        rpn.insert_char('2');
        rpn.add().unwrap();
        assert_eq!(rpn.state(), [3.0].into_iter().collect::<Snapshot>());
    }

    #[test]
    fn test_scenario_e_push_on_empty() {
        let mut rpn = RpnStack::new();
        assert_eq!(rpn.push(), Err(CalcError::TooFewArguments { expected: 1 }));
        assert!(rpn.state().is_empty());
    }

    #[test]
    fn test_scenario_f_exponent_sign() {
        let mut rpn = RpnStack::new();
        "1E-2".chars().for_each(|c| rpn.insert_char(c));
        rpn.change_sign().unwrap();
        assert_eq!(rpn.state().display(), "1E+2");
        rpn.change_sign().unwrap();
        assert_eq!(rpn.state().display(), "1E-2");
    }
}
