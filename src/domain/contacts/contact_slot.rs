// ============================================================
// CONTACT SLOTS
// ============================================================
// Numbered contact blocks discovered in a CSV header

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use super::{EMAIL_COLUMN, FLAGS_COLUMN};

/// Number of a `contact_<i>_*` block.
///
/// Held as its decimal digits without leading zeros, so any number of digits
/// is accepted. Ordering is numeric: shorter first, then by text.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ContactIndex(String);

impl ContactIndex {
    /// Parse the digits captured from a column name. `"007"` and `"7"` are
    /// the same index.
    pub fn parse(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Some(Self(digits.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, when it fits
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl From<u64> for ContactIndex {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<u64> for ContactIndex {
    fn eq(&self, other: &u64) -> bool {
        self.as_u64() == Some(*other)
    }
}

impl Ord for ContactIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for ContactIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ContactIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ContactIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialized as a number when it fits in a `u64`, otherwise as its digits
impl Serialize for ContactIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_u64() {
            Some(value) => serializer.serialize_u64(value),
            None => serializer.serialize_str(&self.0),
        }
    }
}

/// One `contact_<i>_email` column and its optional `contact_<i>_flags` partner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSlot {
    /// Contact number parsed from the column name
    pub index: ContactIndex,

    /// Header position of the email column
    pub email_column: usize,

    /// Header position of the flags column, if the header has one
    pub flags_column: Option<usize>,
}

impl ContactSlot {
    pub fn has_flags(&self) -> bool {
        self.flags_column.is_some()
    }
}

/// Ascending set of contact slots present in a header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactIndexSet {
    slots: Vec<ContactSlot>,
}

impl ContactIndexSet {
    /// Build the set, sorted by index. When two slots share an index the
    /// one listed first is kept.
    pub fn from_slots(mut slots: Vec<ContactSlot>) -> Self {
        slots.sort_by(|a, b| a.index.cmp(&b.index));
        slots.dedup_by(|later, earlier| later.index == earlier.index);
        Self { slots }
    }

    pub fn slots(&self) -> &[ContactSlot] {
        &self.slots
    }

    pub fn indices(&self) -> Vec<ContactIndex> {
        self.slots.iter().map(|slot| slot.index.clone()).collect()
    }

    #[cfg(test)]
    pub fn get(&self, index: u64) -> Option<&ContactSlot> {
        let index = ContactIndex::from(index);
        self.slots
            .binary_search_by(|slot| slot.index.cmp(&index))
            .ok()
            .map(|pos| &self.slots[pos])
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Header split into contact slots and pass-through columns
#[derive(Debug, Clone)]
pub struct ContactLayout {
    headers: Vec<String>,
    contacts: ContactIndexSet,
    passthrough: Vec<usize>,
}

impl ContactLayout {
    pub fn new(headers: Vec<String>, contacts: ContactIndexSet, passthrough: Vec<usize>) -> Self {
        Self {
            headers,
            contacts,
            passthrough,
        }
    }

    /// Original input header
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn contacts(&self) -> &ContactIndexSet {
        &self.contacts
    }

    /// Header positions copied verbatim into every expanded row
    pub fn passthrough_positions(&self) -> &[usize] {
        &self.passthrough
    }

    pub fn passthrough_headers(&self) -> Vec<&str> {
        self.passthrough
            .iter()
            .map(|&pos| self.headers[pos].as_str())
            .collect()
    }

    /// Output header: pass-through columns followed by `Email` and `Flags`
    pub fn output_headers(&self) -> Vec<String> {
        self.passthrough_headers()
            .into_iter()
            .map(str::to_string)
            .chain([EMAIL_COLUMN.to_string(), FLAGS_COLUMN.to_string()])
            .collect()
    }
}
