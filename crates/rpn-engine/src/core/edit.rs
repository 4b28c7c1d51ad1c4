//! Edit buffer for the number currently being typed
//!
//! The buffer holds raw text such as `"3.14"`, `"-12"` or `"1E-2"`. It never
//! validates what [`EditBuffer::insert_char`] appends; the structural rules
//! (one decimal point, one exponent marker, signs only in leading or
//! post-exponent position) are kept by the dedicated entry operations, which
//! silently do nothing when a change would break them.

/// Decimal point character
pub const DECIMAL_POINT: char = '.';
/// Exponent marker character
pub const EXPONENT_MARKER: char = 'E';
/// Negative sign character
pub const NEGATIVE_SIGN: char = '-';
/// Explicit positive sign character
pub const POSITIVE_SIGN: char = '+';

/// Text of a partially-typed number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
}

impl EditBuffer {
    /// Creates an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes editing from previously captured text
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Appends `c` unconditionally
    pub fn insert_char(&mut self, c: char) {
        self.text.push(c);
    }

    /// Removes the last character, if any
    pub fn delete_char(&mut self) {
        self.text.pop();
    }

    /// True once an exponent marker has been entered
    #[must_use]
    pub fn has_exponent(&self) -> bool {
        self.text.contains(EXPONENT_MARKER)
    }

    /// True when the mantissa carries a leading `-`
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.text.starts_with(NEGATIVE_SIGN)
    }

    /// True once a decimal point has been entered
    #[must_use]
    pub fn has_decimal(&self) -> bool {
        self.text.contains(DECIMAL_POINT)
    }

    /// True when nothing has been typed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Toggles the sign of the mantissa, or of the exponent once one exists
    ///
    /// Toggling is explicit: `-` becomes `+`, `+` becomes `-`, and a missing
    /// sign becomes `-`. So `"12345"` goes to `"-12345"` and then `"+12345"`.
    pub fn change_sign(&mut self) {
        let at = match self.text.find(EXPONENT_MARKER) {
            Some(marker) => marker + EXPONENT_MARKER.len_utf8(),
            None => 0,
        };
        Self::toggle_sign_at(&mut self.text, at);
    }

    fn toggle_sign_at(text: &mut String, at: usize) {
        let flipped = match text[at..].chars().next() {
            Some(NEGATIVE_SIGN) => "+",
            Some(POSITIVE_SIGN) => "-",
            _ => {
                text.insert(at, NEGATIVE_SIGN);
                return;
            }
        };
        // Both sign characters are one byte wide.
        text.replace_range(at..=at, flipped);
    }

    /// Appends a decimal point unless one exists or an exponent has started
    ///
    /// An empty buffer becomes `"0."`.
    pub fn enter_decimal(&mut self) {
        if self.has_decimal() || self.has_exponent() {
            return;
        }
        if self.text.is_empty() {
            self.text.push('0');
        }
        self.text.push(DECIMAL_POINT);
    }

    /// Appends the exponent marker unless one exists
    ///
    /// An empty buffer becomes `"1E"`.
    pub fn enter_exponent(&mut self) {
        if self.has_exponent() {
            return;
        }
        if self.text.is_empty() {
            self.text.push('1');
        }
        self.text.push(EXPONENT_MARKER);
    }

    /// Returns the raw text verbatim
    #[must_use]
    pub fn state(&self) -> &str {
        &self.text
    }

    /// Numeric value the text commits to, see [`parse_number`]
    #[must_use]
    pub fn value(&self) -> f64 {
        parse_number(&self.text)
    }

    /// Consumes the buffer, returning its text
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Generic string-to-number coercion used when a buffer is committed
///
/// Surrounding whitespace is ignored and empty text is `0`. Decimal and
/// exponent notation with optional `+`/`-` signs parse normally. Anything
/// else, including fragments like `"-"` or `"1E"`, yields `NaN`, which then
/// poisons every result computed from it.
#[must_use]
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let numeric = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !numeric {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}
