//! Serializable stack snapshots and seed shapes
//!
//! A [`Snapshot`] is what [`RpnStack::state`](crate::core::RpnStack::state)
//! returns: the logical stack top-first, where the first element is the raw
//! edit text while a number is being typed. A [`Seed`] is what a new stack is
//! built from.
//!
//! JSON uses plain values: a text entry is a JSON string, a committed entry a
//! JSON number. Non-finite numbers have no JSON form; they are written as
//! `null` and read back as `NaN`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::edit::parse_number;

/// One element of a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StackEntry {
    /// In-progress edit text, only ever the first element
    Text(String),
    /// Committed number
    Number(#[serde(with = "non_finite_as_null")] f64),
}

impl StackEntry {
    /// Numeric value of the entry, coercing text the way a commit would
    #[must_use]
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Text(text) => parse_number(text),
            Self::Number(n) => *n,
        }
    }

    /// Returns the edit text, if this is a text entry
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(_) => None,
        }
    }

    /// Display form: text verbatim, numbers via [`format_number`]
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(n) => format_number(*n),
        }
    }
}

// Two NaN entries compare equal so that repeated reads of a poisoned stack
// are still observably identical.
impl PartialEq for StackEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => false,
        }
    }
}

impl From<f64> for StackEntry {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for StackEntry {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for StackEntry {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// The logical stack, top first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Vec<StackEntry>);

impl Snapshot {
    /// Display value when the stack is empty
    pub const EMPTY_DISPLAY: &'static str = "0";

    /// Wraps entries given top first
    #[must_use]
    pub fn new(entries: Vec<StackEntry>) -> Self {
        Self(entries)
    }

    /// Entries, top first
    #[must_use]
    pub fn entries(&self) -> &[StackEntry] {
        &self.0
    }

    /// Consumes the snapshot, returning its entries
    #[must_use]
    pub fn into_entries(self) -> Vec<StackEntry> {
        self.0
    }

    /// Number of logical entries, counting an active edit
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for an empty, idle stack
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Top of the logical stack
    #[must_use]
    pub fn top(&self) -> Option<&StackEntry> {
        self.0.first()
    }

    /// True when the snapshot was taken mid-edit
    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.top(), Some(StackEntry::Text(_)))
    }

    /// What the display shows: the top entry, or `"0"` on an empty stack
    #[must_use]
    pub fn display(&self) -> String {
        self.top()
            .map_or_else(|| Self::EMPTY_DISPLAY.to_string(), StackEntry::display)
    }

    /// Serializes the snapshot to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl<E: Into<StackEntry>> FromIterator<E> for Snapshot {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Initial content for a new stack
///
/// Either committed numbers only, or an in-progress edit plus the numbers
/// beneath it. In JSON a seed is written either as a snapshot array
/// (`["1.2E-3", 456]`, a leading string meaning "resume editing") or as the
/// record `{"editing_text": "1.2E-3", "committed": [456]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Seed {
    /// Committed values, top first
    Committed(Vec<f64>),
    /// Resumed edit text above committed values
    Editing {
        /// Raw edit text
        editing_text: String,
        /// Committed values, top first
        committed: Vec<f64>,
    },
}

impl Default for Seed {
    fn default() -> Self {
        Self::Committed(Vec::new())
    }
}

impl Seed {
    /// Parses a seed from JSON in either accepted shape
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Vec<f64>> for Seed {
    fn from(values: Vec<f64>) -> Self {
        Self::Committed(values)
    }
}

/// Reads a snapshot as a seed: a leading text entry resumes editing, and any
/// later text entries are coerced to numbers.
impl From<Snapshot> for Seed {
    fn from(snapshot: Snapshot) -> Self {
        let mut entries = snapshot.into_entries().into_iter();
        match entries.next() {
            None => Self::default(),
            Some(StackEntry::Text(editing_text)) => Self::Editing {
                editing_text,
                committed: entries.map(|e| e.as_number()).collect(),
            },
            Some(StackEntry::Number(top)) => Self::Committed(
                std::iter::once(top)
                    .chain(entries.map(|e| e.as_number()))
                    .collect(),
            ),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeedRepr {
    Snapshot(Snapshot),
    Record(SeedRecord),
}

/// `committed` is required so that an arbitrary object is not read as an
/// empty seed
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedRecord {
    #[serde(default, alias = "editingText")]
    editing_text: Option<String>,
    #[serde(deserialize_with = "non_finite_as_null::deserialize_all")]
    committed: Vec<f64>,
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match SeedRepr::deserialize(deserializer)? {
            SeedRepr::Record(SeedRecord {
                editing_text: Some(editing_text),
                committed,
            }) => Self::Editing {
                editing_text,
                committed,
            },
            SeedRepr::Record(SeedRecord {
                editing_text: None,
                committed,
            }) => Self::Committed(committed),
            SeedRepr::Snapshot(snapshot) => Self::from(snapshot),
        })
    }
}

/// Formats a committed number for display
///
/// Integral values print without a fractional part and negative zero prints
/// as `"0"`. Magnitudes below `1e-6` or from `1e21` up switch to `E`
/// notation, the same cutoffs a JavaScript number uses.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        let label = if n > 0.0 { "Infinity" } else { "-Infinity" };
        return label.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        return format!("{n:E}");
    }
    format!("{n}")
}

mod non_finite_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }

    pub fn deserialize_all<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<f64>, D::Error> {
        let values = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}
