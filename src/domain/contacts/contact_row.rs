// ============================================================
// CONTACT ROW TYPES
// ============================================================
// Source records and the one-contact-per-row records derived from them

use serde::Serialize;

use super::ContactIndex;

/// Name of the unified email column in the cleaned output
pub const EMAIL_COLUMN: &str = "Email";

/// Name of the unified flags column in the cleaned output
pub const FLAGS_COLUMN: &str = "Flags";

/// A single record of the input CSV, aligned with its header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// Record number (1-based, header excluded)
    pub record_number: u64,

    /// Raw cell values
    pub cells: Vec<String>,
}

impl SourceRow {
    pub fn new(record_number: u64, cells: Vec<String>) -> Self {
        Self {
            record_number,
            cells,
        }
    }

    /// Cell at a header position. Ragged rows read missing cells as empty.
    pub fn cell(&self, position: usize) -> &str {
        self.cells.get(position).map(String::as_str).unwrap_or("")
    }
}

/// A non-empty, trimmed contact email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Returns `None` when the cell is blank
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key used for case-insensitive duplicate detection
    pub fn dedupe_key(&self) -> String {
        self.0.to_lowercase()
    }
}

/// Free-text occupancy flags attached to a contact, stored as read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Flags(String);

impl Flags {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trimmed and lowercased form used for phrase matching
    pub fn normalized(&self) -> String {
        self.0.trim().to_lowercase()
    }
}

/// One contact exploded out of a source row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedRow {
    /// Record number of the source row
    pub record_number: u64,

    /// Contact block this row was taken from
    pub contact_index: ContactIndex,

    /// Pass-through cells, in output header order
    pub passthrough: Vec<String>,

    pub email: ContactEmail,

    pub flags: Flags,
}

impl ExpandedRow {
    /// Cells in output order: pass-through, then `Email`, then `Flags`
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.passthrough
            .iter()
            .map(String::as_str)
            .chain([self.email.as_str(), self.flags.as_str()])
    }

    /// Format as a markdown-ish block for previews. Empty cells are skipped.
    pub fn format_structured(&self, headers: &[String]) -> String {
        headers
            .iter()
            .zip(self.cells())
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(name, value)| format!("- {}: {}", name, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
