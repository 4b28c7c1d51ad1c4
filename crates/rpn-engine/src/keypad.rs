//! Keypad layout and key-token parsing
//!
//! Visual feedback: the keypad describes every button the UI can render,
//! keyed by the element name the UI wires click handlers to. Text hosts
//! (the CLI, tests) use [`parse_token`] and [`parse_line`] instead.

use crate::core::{CalcError, CalcResult, Operation};

const DIGIT_NAMES: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// A single keypad button definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadButton {
    /// Element name, e.g. `"7"`, `"enter"`, `"changeSign"`
    pub name: &'static str,
    /// Text printed on the key
    pub label: &'static str,
    /// The operation this button dispatches
    pub op: Operation,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButton {
    const fn new(name: &'static str, label: &'static str, op: Operation, row: usize, col: usize) -> Self {
        Self {
            name,
            label,
            op,
            row,
            col,
        }
    }

    fn digit(d: u8, row: usize, col: usize) -> Self {
        let name = DIGIT_NAMES[usize::from(d)];
        Self::new(name, name, Operation::InsertChar(char::from(b'0' + d)), row, col)
    }
}

/// Keypad layout
///
/// ```text
/// [ENTER] [ CHS ] [ EEX ] [ DEL ]
/// [  7  ] [  8  ] [  9  ] [  /  ]
/// [  4  ] [  5  ] [  6  ] [  *  ]
/// [  1  ] [  2  ] [  3  ] [  -  ]
/// [  0  ] [  .  ] [DROP ] [  +  ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard RPN keypad
    #[must_use]
    pub fn new() -> Self {
        let buttons = vec![
            KeypadButton::new("enter", "ENTER", Operation::Push, 0, 0),
            KeypadButton::new("changeSign", "CHS", Operation::ChangeSign, 0, 1),
            KeypadButton::new("enterExponent", "EEX", Operation::EnterExponent, 0, 2),
            KeypadButton::new("deleteChar", "DEL", Operation::DeleteChar, 0, 3),
            KeypadButton::digit(7, 1, 0),
            KeypadButton::digit(8, 1, 1),
            KeypadButton::digit(9, 1, 2),
            KeypadButton::new("divide", "/", Operation::DIVIDE, 1, 3),
            KeypadButton::digit(4, 2, 0),
            KeypadButton::digit(5, 2, 1),
            KeypadButton::digit(6, 2, 2),
            KeypadButton::new("multiply", "*", Operation::MULTIPLY, 2, 3),
            KeypadButton::digit(1, 3, 0),
            KeypadButton::digit(2, 3, 1),
            KeypadButton::digit(3, 3, 2),
            KeypadButton::new("subtract", "-", Operation::SUBTRACT, 3, 3),
            KeypadButton::digit(0, 4, 0),
            KeypadButton::new("enterDecimal", ".", Operation::EnterDecimal, 4, 1),
            KeypadButton::new("drop", "DROP", Operation::Drop, 4, 2),
            KeypadButton::new("add", "+", Operation::ADD, 4, 3),
        ];

        Self {
            buttons,
            rows: 5,
            cols: 4,
        }
    }

    /// All buttons in row-major order
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Number of grid rows
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Finds a button by element name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.name == name)
    }

    /// Button at a grid position
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Renders the layout as text, one keypad row per line
    #[must_use]
    pub fn render(&self) -> String {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .filter_map(|col| self.get_button_at(row, col))
                    .map(|b| format!("[{:^7}]", b.label))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parses one key token into the operations it stands for
///
/// A token is a keypad name (`"enter"`, `"changeSign"`), a short alias
/// (`chs`, `eex`, `del`, `dup`, `+`, `x`), or a numeric literal such as
/// `3.14`, `-2` or `1e-2`, which expands to the keys that type it.
pub fn parse_token(token: &str) -> CalcResult<Vec<Operation>> {
    if let Some(op) = Operation::from_name(token, None) {
        return Ok(vec![op]);
    }
    if let Some(op) = alias(&token.to_ascii_lowercase()) {
        return Ok(vec![op]);
    }
    literal(token).ok_or_else(|| CalcError::unknown_key(token))
}

/// Parses a whitespace-separated line of key tokens
pub fn parse_line(line: &str) -> CalcResult<Vec<Operation>> {
    let mut ops = Vec::new();
    for token in line.split_whitespace() {
        ops.extend(parse_token(token)?);
    }
    Ok(ops)
}

fn alias(token: &str) -> Option<Operation> {
    let op = match token {
        "." => Operation::EnterDecimal,
        "e" | "eex" | "exp" => Operation::EnterExponent,
        "chs" | "neg" | "±" | "+/-" => Operation::ChangeSign,
        "del" | "bs" | "back" | "backspace" => Operation::DeleteChar,
        "dup" | "push" => Operation::Push,
        "+" => Operation::ADD,
        "-" => Operation::SUBTRACT,
        "*" | "x" | "×" => Operation::MULTIPLY,
        "/" | "÷" => Operation::DIVIDE,
        _ => return None,
    };
    Some(op)
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    }
}

/// Key sequence typing a numeric literal, or `None` if `token` is not one
///
/// Signs are typed after the digits they apply to, since a sign change
/// pressed while idle negates the committed top instead of starting an edit.
fn literal(token: &str) -> Option<Vec<Operation>> {
    let (negative, body) = split_sign(token);
    let (mantissa, exponent) = match body.find(|c: char| c == 'e' || c == 'E') {
        Some(marker) => (&body[..marker], Some(&body[marker + 1..])),
        None => (body, None),
    };

    let mut ops = Vec::new();
    let mut seen_point = false;
    let mut seen_digit = false;
    for c in mantissa.chars() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                ops.push(Operation::InsertChar(c));
            }
            '.' if !seen_point => {
                seen_point = true;
                ops.push(Operation::EnterDecimal);
            }
            _ => return None,
        }
    }
    if !seen_digit {
        return None;
    }
    if negative {
        ops.push(Operation::ChangeSign);
    }

    if let Some(exponent) = exponent {
        let (exp_negative, digits) = split_sign(exponent);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        ops.push(Operation::EnterExponent);
        if exp_negative {
            ops.push(Operation::ChangeSign);
        }
        ops.extend(digits.chars().map(Operation::InsertChar));
    }
    Some(ops)
}
