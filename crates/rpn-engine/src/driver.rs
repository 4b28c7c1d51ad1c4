//! Unified calculator driver
//!
//! Write the behavioural checks once and run them against anything that can
//! take key presses and show a display: the bare [`RpnStack`], a
//! [`Session`], or a host wrapping one.

use crate::core::{CalcError, CalcResult, Operation, RpnStack, Snapshot, StackEntry};
use crate::keypad;
use crate::session::Session;

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Dispatches one operation
    fn press(&mut self, op: Operation) -> CalcResult<()>;

    /// Current display text
    fn display(&self) -> String;

    /// Current logical stack
    fn snapshot(&self) -> Snapshot;

    /// Returns to an empty stack
    fn reset(&mut self);

    /// Dispatches a line of key tokens, stopping at the first error
    fn press_keys(&mut self, keys: &str) -> CalcResult<()> {
        keypad::parse_line(keys)?
            .into_iter()
            .try_for_each(|op| self.press(op))
    }
}

impl CalculatorDriver for RpnStack {
    fn press(&mut self, op: Operation) -> CalcResult<()> {
        self.apply(op)
    }

    fn display(&self) -> String {
        self.state().display()
    }

    fn snapshot(&self) -> Snapshot {
        self.state()
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

impl CalculatorDriver for Session {
    fn press(&mut self, op: Operation) -> CalcResult<()> {
        Session::press(self, op)
    }

    fn display(&self) -> String {
        Session::display(self)
    }

    fn snapshot(&self) -> Snapshot {
        self.state()
    }

    fn reset(&mut self) {
        Session::reset(self);
    }

    /// Dispatches token by token so every rejection is logged and counted
    fn press_keys(&mut self, keys: &str) -> CalcResult<()> {
        self.press_line(keys)
    }
}

fn numbers(values: &[f64]) -> Snapshot {
    values.iter().copied().collect()
}

// ===== Unified Checks =====
// These work with ANY CalculatorDriver implementation

/// Verifies number entry: deletion, decimal and exponent entry, sign toggling
pub fn verify_entry_editing<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.reset();
    driver.press_keys("3.14")?;
    driver.press(Operation::DeleteChar)?;
    assert_eq!(driver.display(), "3.1");

    driver.reset();
    driver.press_keys("12345")?;
    driver.press(Operation::ChangeSign)?;
    assert_eq!(driver.display(), "-12345");
    driver.press(Operation::ChangeSign)?;
    assert_eq!(driver.display(), "+12345");

    driver.reset();
    driver.press_keys("1E-2")?;
    driver.press(Operation::ChangeSign)?;
    assert_eq!(driver.display(), "1E+2");
    driver.press(Operation::ChangeSign)?;
    assert_eq!(driver.display(), "1E-2");

    driver.reset();
    driver.press_keys(". .")?;
    assert_eq!(driver.display(), "0.");
    driver.press_keys("eex eex .")?;
    assert_eq!(driver.display(), "0.E");
    Ok(())
}

/// Verifies push, duplicate and drop
pub fn verify_stack_ops<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.reset();
    assert_eq!(driver.press(Operation::Push), Err(CalcError::too_few(1)));
    assert_eq!(driver.snapshot(), Snapshot::default());
    assert_eq!(driver.display(), "0");

    driver.press_keys("7 enter enter")?;
    assert_eq!(driver.snapshot(), numbers(&[7.0, 7.0]));

    driver.press_keys("9")?;
    assert_eq!(
        driver.snapshot(),
        Snapshot::new(vec![StackEntry::from("9"), 7.0.into(), 7.0.into()])
    );
    driver.press(Operation::Drop)?;
    assert_eq!(driver.snapshot(), numbers(&[7.0, 7.0]));

    driver.press_keys("drop drop")?;
    assert_eq!(driver.press(Operation::Drop), Err(CalcError::too_few(1)));
    Ok(())
}

/// Verifies the four operators and their operand order
pub fn verify_arithmetic<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    for (keys, expected) in [
        ("1 enter 2 +", "3"),
        ("10 enter 3 -", "7"),
        ("6 enter 7 *", "42"),
        ("20 enter 4 /", "5"),
        ("2 enter 3 enter 4 * +", "14"),
    ] {
        driver.reset();
        driver.press_keys(keys)?;
        assert_eq!(driver.display(), expected, "{keys}");
    }
    Ok(())
}

/// Verifies that rejected operations leave the stack unchanged
pub fn verify_error_handling<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    let result = driver.press_keys("1 enter 0 enter /");
    assert_eq!(result, Err(CalcError::InfiniteResult));
    assert_eq!(driver.snapshot(), numbers(&[0.0, 1.0]));

    driver.reset();
    assert_eq!(driver.press_keys("5 +"), Err(CalcError::too_few(2)));
    assert_eq!(driver.display(), "5");

    driver.reset();
    assert!(matches!(
        driver.press_keys("sqrt"),
        Err(CalcError::UnknownKey(_))
    ));
    assert_eq!(driver.snapshot(), Snapshot::default());
}

/// Complete verification suite
pub fn run_full_suite<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    verify_entry_editing(driver)?;
    verify_stack_ops(driver)?;
    verify_arithmetic(driver)?;
    verify_error_handling(driver);
    Ok(())
}
