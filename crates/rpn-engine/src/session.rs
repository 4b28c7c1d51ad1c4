//! Reference UI collaborator
//!
//! A [`Session`] owns the engine for one user session, dispatches one
//! operation per input event, and logs rejected operations without touching
//! the display. Hosts (the CLI, a GUI, tests) render [`Session::display`].

use tracing::{trace, warn};

use crate::core::{CalcError, CalcResult, Operation, RpnStack, Seed, Snapshot};
use crate::keypad;

/// One calculator session
#[derive(Debug, Clone, Default)]
pub struct Session {
    stack: RpnStack,
    last_error: Option<CalcError>,
    rejected: usize,
}

impl Session {
    /// Creates a session with an empty stack
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session resuming from a seed
    #[must_use]
    pub fn with_seed(seed: impl Into<Seed>) -> Self {
        Self {
            stack: RpnStack::with_seed(seed),
            ..Self::default()
        }
    }

    /// Dispatches one operation
    ///
    /// A rejected operation is logged and returned; the stack is left exactly
    /// as the engine left it, which for every failure is the pre-call state.
    pub fn press(&mut self, op: Operation) -> CalcResult<()> {
        match self.stack.apply(op) {
            Ok(()) => {
                trace!(op = %op, display = %self.display(), "pressed");
                self.last_error = None;
                Ok(())
            }
            Err(err) => Err(self.reject(op.name(), err)),
        }
    }

    /// Dispatches every operation a key token stands for, stopping at the
    /// first rejection
    pub fn press_key(&mut self, token: &str) -> CalcResult<()> {
        let ops = keypad::parse_token(token).map_err(|err| self.reject(token, err))?;
        ops.into_iter().try_for_each(|op| self.press(op))
    }

    /// Dispatches a whitespace-separated line of key tokens
    pub fn press_line(&mut self, line: &str) -> CalcResult<()> {
        line.split_whitespace()
            .try_for_each(|token| self.press_key(token))
    }

    fn reject(&mut self, what: &str, err: CalcError) -> CalcError {
        warn!(op = what, kind = err.kind(), error = %err, "operation rejected");
        self.rejected += 1;
        self.last_error = Some(err.clone());
        err
    }

    /// Text the display shows: the top entry, or `"0"` when empty
    #[must_use]
    pub fn display(&self) -> String {
        self.stack.state().display()
    }

    /// Current logical stack
    #[must_use]
    pub fn state(&self) -> Snapshot {
        self.stack.state()
    }

    /// The underlying engine
    #[must_use]
    pub fn stack(&self) -> &RpnStack {
        &self.stack
    }

    /// Error from the most recent operation, cleared by the next success
    #[must_use]
    pub fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }

    /// Number of operations rejected so far
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    /// Discards all state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
