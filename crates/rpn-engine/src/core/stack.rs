//! Operand stack and the edit/commit state machine
//!
//! Error prevention: "currently editing" is an explicit [`EditState`] slot,
//! so every operation pattern-matches on it instead of probing for a buffer.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::core::edit::EditBuffer;
use crate::core::snapshot::{Seed, Snapshot, StackEntry};
use crate::core::{BinaryOp, CalcError, CalcResult, Operation};

/// Whether a number is being typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    /// No edit in progress; the top of stack, if any, is committed
    #[default]
    Idle,
    /// An uncommitted number, logically above every committed entry
    Editing(EditBuffer),
}

/// The RPN engine: committed entries plus at most one active edit
///
/// Index 0 of the committed entries is the top of stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RpnStack {
    entries: VecDeque<f64>,
    edit: EditState,
}

impl RpnStack {
    /// Creates an empty, idle stack
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stack from a seed, resuming an edit if the seed carries one
    #[must_use]
    pub fn with_seed(seed: impl Into<Seed>) -> Self {
        match seed.into() {
            Seed::Committed(values) => Self {
                entries: values.into(),
                edit: EditState::Idle,
            },
            Seed::Editing {
                editing_text,
                committed,
            } => Self {
                entries: committed.into(),
                edit: EditState::Editing(EditBuffer::from_text(editing_text)),
            },
        }
    }

    /// True while a number is being typed
    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.edit, EditState::Editing(_))
    }

    /// The active edit, if any
    #[must_use]
    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Committed entries, top first
    #[must_use]
    pub fn committed(&self) -> &VecDeque<f64> {
        &self.entries
    }

    /// Number of committed entries, excluding any active edit
    #[must_use]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Begins an empty edit unless one is already active
    pub fn start_edit(&mut self) {
        if !self.is_editing() {
            self.edit = EditState::Editing(EditBuffer::new());
        }
    }

    /// Commits the active edit onto the stack; no-op when idle
    pub fn end_edit(&mut self) {
        if let EditState::Editing(buffer) = std::mem::take(&mut self.edit) {
            let value = buffer.value();
            trace!(text = buffer.state(), value, "commit");
            self.entries.push_front(value);
        }
    }

    /// Runs `f` on the active buffer, starting a fresh edit when idle
    fn edit_with(&mut self, f: impl FnOnce(&mut EditBuffer)) {
        let mut buffer = match std::mem::take(&mut self.edit) {
            EditState::Editing(buffer) => buffer,
            EditState::Idle => EditBuffer::new(),
        };
        f(&mut buffer);
        self.edit = EditState::Editing(buffer);
    }

    /// Appends a character to the edit, starting one if idle
    pub fn insert_char(&mut self, c: char) {
        self.edit_with(|buffer| buffer.insert_char(c));
    }

    /// Removes the last edited character; never touches committed entries
    pub fn delete_char(&mut self) {
        if let EditState::Editing(buffer) = &mut self.edit {
            buffer.delete_char();
        }
    }

    /// Toggles the edited sign, or negates the committed top when idle
    ///
    /// Negating an empty, idle stack fails with `TooFewArguments`, like
    /// [`push`](Self::push) and [`drop`](Self::drop).
    pub fn change_sign(&mut self) -> CalcResult<()> {
        match &mut self.edit {
            EditState::Editing(buffer) => {
                buffer.change_sign();
                Ok(())
            }
            EditState::Idle => {
                let top = self.entries.front_mut().ok_or_else(|| CalcError::too_few(1))?;
                *top = -*top;
                Ok(())
            }
        }
    }

    /// Enters a decimal point, starting an edit if idle
    pub fn enter_decimal(&mut self) {
        self.edit_with(EditBuffer::enter_decimal);
    }

    /// Enters the exponent marker, starting an edit if idle
    pub fn enter_exponent(&mut self) {
        self.edit_with(EditBuffer::enter_exponent);
    }

    /// Commits the active edit, or duplicates the top entry when idle
    pub fn push(&mut self) -> CalcResult<()> {
        if self.is_editing() {
            self.end_edit();
            return Ok(());
        }
        self.require(1)?;
        let top = self.entries[0];
        self.entries.push_front(top);
        Ok(())
    }

    /// Discards the active edit, or removes the top entry when idle
    pub fn drop(&mut self) -> CalcResult<()> {
        if self.is_editing() {
            self.edit = EditState::Idle;
            return Ok(());
        }
        self.require(1)?;
        self.entries.pop_front();
        Ok(())
    }

    /// `y + x`
    pub fn add(&mut self) -> CalcResult<()> {
        self.binary(BinaryOp::Add)
    }

    /// `y - x`
    pub fn subtract(&mut self) -> CalcResult<()> {
        self.binary(BinaryOp::Subtract)
    }

    /// `y * x`
    pub fn multiply(&mut self) -> CalcResult<()> {
        self.binary(BinaryOp::Multiply)
    }

    /// `y / x`, rejecting a zero divisor
    pub fn divide(&mut self) -> CalcResult<()> {
        self.binary(BinaryOp::Divide)
    }

    /// Commits any edit, then replaces the top two entries with `op(x, y)`
    ///
    /// The operands stay in place until the result is known, so a rejected
    /// operation (too few entries, zero divisor) leaves the committed stack
    /// untouched. The implicit commit itself is not rolled back.
    pub fn binary(&mut self, op: BinaryOp) -> CalcResult<()> {
        self.end_edit();
        self.require(2)?;
        let (x, y) = (self.entries[0], self.entries[1]);
        let result = op.apply(x, y)?;
        debug!(op = op.symbol(), x, y, result, "binary");
        self.entries.drain(..2);
        self.entries.push_front(result);
        Ok(())
    }

    /// Dispatches a single operation request
    pub fn apply(&mut self, op: Operation) -> CalcResult<()> {
        match op {
            Operation::InsertChar(c) => self.insert_char(c),
            Operation::DeleteChar => self.delete_char(),
            Operation::ChangeSign => return self.change_sign(),
            Operation::EnterDecimal => self.enter_decimal(),
            Operation::EnterExponent => self.enter_exponent(),
            Operation::Push => return self.push(),
            Operation::Drop => return self.drop(),
            Operation::Binary(op) => return self.binary(op),
        }
        Ok(())
    }

    /// Snapshot of the logical stack; the edit text comes first while editing
    #[must_use]
    pub fn state(&self) -> Snapshot {
        let edit = match &self.edit {
            EditState::Editing(buffer) => Some(StackEntry::from(buffer.state())),
            EditState::Idle => None,
        };
        edit.into_iter()
            .chain(self.entries.iter().copied().map(StackEntry::Number))
            .collect()
    }

    fn require(&self, expected: usize) -> CalcResult<()> {
        if self.entries.len() < expected {
            return Err(CalcError::too_few(expected));
        }
        Ok(())
    }
}

impl From<Seed> for RpnStack {
    fn from(seed: Seed) -> Self {
        Self::with_seed(seed)
    }
}
