//! Property-based tests for the RPN engine
//!
//! Error prevention: property tests catch edge cases that humans miss

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rpn_engine::core::edit::{DECIMAL_POINT, EXPONENT_MARKER};
use rpn_engine::prelude::*;

// ===== Strategy definitions =====

fn digit_strategy() -> impl Strategy<Value = char> {
    proptest::char::range('0', '9')
}

fn binary_strategy() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Add),
        Just(BinaryOp::Subtract),
        Just(BinaryOp::Multiply),
        Just(BinaryOp::Divide),
    ]
}

/// Any keypad operation, with digit-only character entry
fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => digit_strategy().prop_map(Operation::InsertChar),
        1 => Just(Operation::DeleteChar),
        1 => Just(Operation::ChangeSign),
        1 => Just(Operation::EnterDecimal),
        1 => Just(Operation::EnterExponent),
        2 => Just(Operation::Push),
        1 => Just(Operation::Drop),
        2 => binary_strategy().prop_map(Operation::Binary),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Operation>> {
    proptest::collection::vec(operation_strategy(), 0..40)
}

fn run(ops: &[Operation]) -> RpnStack {
    let mut rpn = RpnStack::new();
    for op in ops {
        let _ = rpn.apply(*op);
    }
    rpn
}

fn digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

/// Structural rules every buffer built from keypad operations must satisfy
fn well_formed(text: &str) -> bool {
    let points = text.matches(DECIMAL_POINT).count();
    let markers = text.matches(EXPONENT_MARKER).count();
    if points > 1 || markers > 1 {
        return false;
    }
    let (mantissa, exponent) = match text.find(EXPONENT_MARKER) {
        Some(i) => (&text[..i], Some(&text[i + 1..])),
        None => (text, None),
    };
    let unsigned = mantissa
        .strip_prefix(['-', '+'].as_slice())
        .unwrap_or(mantissa);
    if unsigned.contains(['-', '+'].as_slice()) {
        return false;
    }
    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['-', '+'].as_slice()).unwrap_or(exp);
            !exp.contains(DECIMAL_POINT) && digits(exp)
        }
    }
}

// ===== Reads =====

proptest! {
    /// Two reads without a mutation in between agree
    #[test]
    fn prop_state_is_pure(ops in ops_strategy()) {
        let rpn = run(&ops);
        prop_assert_eq!(rpn.state(), rpn.state());
    }

    /// Seeding a new stack with a snapshot reproduces the snapshot
    #[test]
    fn prop_snapshot_round_trip(ops in ops_strategy()) {
        let state = run(&ops).state();
        let resumed = RpnStack::with_seed(state.clone());
        prop_assert_eq!(resumed.state(), state);
    }

    /// The JSON form of a snapshot seeds an identical stack
    #[test]
    fn prop_snapshot_json_round_trip(ops in ops_strategy()) {
        let state = run(&ops).state();
        let seed = Seed::from_json(&state.to_json().unwrap()).unwrap();
        let resumed = RpnStack::with_seed(seed);
        let resumed_state = resumed.state();
        prop_assert_eq!(resumed_state.len(), state.len());
        for (a, b) in resumed_state.entries().iter().zip(state.entries()) {
            match (a, b) {
                (StackEntry::Number(x), StackEntry::Number(y)) if !y.is_finite() => {
                    // Non-finite values come back as NaN
                    prop_assert!(x.is_nan());
                }
                _ => prop_assert_eq!(a, b),
            }
        }
    }
}

// ===== Failure atomicity =====

proptest! {
    /// A rejected operation leaves the stack as it was, apart from the
    /// implicit commit a binary operator performs first
    #[test]
    fn prop_rejected_ops_do_not_mutate(ops in ops_strategy(), op in operation_strategy()) {
        let mut rpn = run(&ops);
        let mut expected = rpn.clone();
        if let Operation::Binary(_) = op {
            expected.end_edit();
        }
        if rpn.apply(op).is_err() {
            prop_assert_eq!(rpn.state(), expected.state());
        }
    }

    /// Errors only ever come from a too-shallow stack or a zero divisor
    #[test]
    fn prop_error_kinds(ops in ops_strategy(), op in operation_strategy()) {
        let mut rpn = run(&ops);
        let editing = rpn.is_editing();
        let depth = rpn.depth();
        match rpn.apply(op) {
            Ok(()) => {}
            Err(CalcError::TooFewArguments { expected: 1 }) => {
                prop_assert!(!editing && depth == 0);
            }
            Err(CalcError::TooFewArguments { expected: 2 }) => {
                prop_assert!(depth + usize::from(editing) < 2);
            }
            Err(CalcError::InfiniteResult) => {
                prop_assert_eq!(op, Operation::DIVIDE);
                prop_assert_eq!(rpn.committed()[0], 0.0);
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }
}

// ===== Edit buffer =====

proptest! {
    /// Keypad operations never produce a malformed buffer
    #[test]
    fn prop_buffer_stays_well_formed(ops in ops_strategy()) {
        let rpn = run(&ops);
        if let EditState::Editing(buffer) = rpn.edit_state() {
            prop_assert!(well_formed(buffer.state()), "{:?}", buffer.state());
        }
    }

    /// Entering a decimal point twice equals entering it once
    #[test]
    fn prop_enter_decimal_idempotent(text in "[0-9]{0,6}(\\.[0-9]{0,3})?(E-?[0-9]{0,2})?") {
        let mut once = EditBuffer::from_text(text.clone());
        once.enter_decimal();
        let mut twice = once.clone();
        twice.enter_decimal();
        prop_assert_eq!(once.state(), twice.state());
    }

    /// Entering the exponent twice equals entering it once, after which a
    /// decimal point is refused
    #[test]
    fn prop_enter_exponent_idempotent(text in "-?[0-9]{0,6}(\\.[0-9]{0,3})?") {
        let mut once = EditBuffer::from_text(text);
        once.enter_exponent();
        let mut twice = once.clone();
        twice.enter_exponent();
        prop_assert_eq!(once.state(), twice.state());

        let before = twice.state().to_string();
        twice.enter_decimal();
        prop_assert_eq!(twice.state(), before.as_str());
    }

    /// Toggling an explicitly signed mantissa twice restores it
    #[test]
    fn prop_change_sign_involution_explicit(sign in "[+-]", body in "[0-9]{1,6}(\\.[0-9]{1,3})?") {
        let text = format!("{sign}{body}");
        let mut buffer = EditBuffer::from_text(text.clone());
        buffer.change_sign();
        buffer.change_sign();
        prop_assert_eq!(buffer.state(), text.as_str());
    }

    /// An unsigned mantissa normalizes to an explicit sign
    #[test]
    fn prop_change_sign_unsigned_normalizes(body in "[0-9]{1,6}") {
        let mut buffer = EditBuffer::from_text(body.clone());
        buffer.change_sign();
        prop_assert_eq!(buffer.state(), format!("-{body}"));
        buffer.change_sign();
        prop_assert_eq!(buffer.state(), format!("+{body}"));
    }

    /// With an exponent present only the exponent sign flips
    #[test]
    fn prop_change_sign_exponent_only(
        mantissa in "-?[0-9]{1,4}",
        sign in "[+-]",
        exp in "[0-9]{1,3}",
    ) {
        let text = format!("{mantissa}E{sign}{exp}");
        let mut buffer = EditBuffer::from_text(text.clone());
        buffer.change_sign();
        let flipped = if sign == "-" { "+" } else { "-" };
        prop_assert_eq!(buffer.state(), format!("{mantissa}E{flipped}{exp}"));
        buffer.change_sign();
        prop_assert_eq!(buffer.state(), text.as_str());
    }

    /// Committed text parses to the value Rust would parse
    #[test]
    fn prop_commit_value_matches_literal(x in -1e6f64..1e6f64) {
        let text = format!("{x}");
        let mut rpn = RpnStack::new();
        text.chars().for_each(|c| rpn.insert_char(c));
        rpn.push().unwrap();
        prop_assert_eq!(rpn.committed()[0], x);
    }
}

// ===== Key tokens =====

proptest! {
    /// Typing a literal token leaves that literal in the display
    #[test]
    fn prop_literal_token_types_itself(n in 0u32..1_000_000, frac in proptest::option::of(0u32..1000)) {
        let token = match frac {
            Some(f) => format!("{n}.{f}"),
            None => n.to_string(),
        };
        let mut session = Session::new();
        session.press_key(&token).unwrap();
        prop_assert_eq!(session.display(), token);
    }

    /// Two literals separated by enter add up
    #[test]
    fn prop_enter_then_add(a in 0u32..10_000, b in 0u32..10_000) {
        let mut session = Session::new();
        session.press_line(&format!("{a} enter {b} +")).unwrap();
        prop_assert_eq!(session.display(), (a + b).to_string());
    }
}
