// ============================================================
// COLUMN DETECTOR
// ============================================================
// Find numbered contact blocks in an arbitrary export header

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::contacts::{
    ContactIndex, ContactIndexSet, ContactLayout, ContactSlot, EMAIL_COLUMN, FLAGS_COLUMN,
};

static EMAIL_COLUMN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^contact_([0-9]+)_email$").unwrap());

static FLAGS_COLUMN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^contact_([0-9]+)_flags$").unwrap());

/// Role a header column plays inside a contact block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactColumn {
    Email(ContactIndex),
    Flags(ContactIndex),
}

/// Maps header names to contact columns.
///
/// Upstream naming is outside our control; a new export format only needs
/// a new matcher.
pub trait ContactColumnMatcher {
    fn match_column(&self, name: &str) -> Option<ContactColumn>;

    /// Whether the column belongs to a contact block and must be removed
    /// from the pass-through set, even if no index could be read from it.
    fn is_contact_column(&self, name: &str) -> bool {
        self.match_column(name).is_some()
    }
}

/// DealMachine naming: exact, case-sensitive `contact_<i>_email` / `contact_<i>_flags`
#[derive(Debug, Clone, Copy, Default)]
pub struct DealMachineMatcher;

impl ContactColumnMatcher for DealMachineMatcher {
    fn match_column(&self, name: &str) -> Option<ContactColumn> {
        if let Some(caps) = EMAIL_COLUMN_PATTERN.captures(name) {
            return ContactIndex::parse(&caps[1]).map(ContactColumn::Email);
        }
        if let Some(caps) = FLAGS_COLUMN_PATTERN.captures(name) {
            return ContactIndex::parse(&caps[1]).map(ContactColumn::Flags);
        }
        None
    }
}

/// Splits a header into contact slots and pass-through columns
#[derive(Debug, Clone, Default)]
pub struct ColumnDetector<M = DealMachineMatcher> {
    matcher: M,
}

impl ColumnDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: ContactColumnMatcher> ColumnDetector<M> {
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// Ascending contact indices that have an email column
    #[cfg(test)]
    pub fn detect_indices(&self, headers: &[String]) -> ContactIndexSet {
        self.detect(headers).contacts().clone()
    }

    pub fn detect(&self, headers: &[String]) -> ContactLayout {
        let mut emails: BTreeMap<ContactIndex, usize> = BTreeMap::new();
        let mut flags: BTreeMap<ContactIndex, usize> = BTreeMap::new();
        let mut passthrough = Vec::new();

        for (position, name) in headers.iter().enumerate() {
            match self.matcher.match_column(name) {
                Some(ContactColumn::Email(index)) => {
                    emails.entry(index).or_insert(position);
                }
                Some(ContactColumn::Flags(index)) => {
                    flags.entry(index).or_insert(position);
                }
                None if self.matcher.is_contact_column(name) => {}
                // replaced by the unified fields
                None if name == EMAIL_COLUMN || name == FLAGS_COLUMN => {}
                None => passthrough.push(position),
            }
        }

        let slots = emails
            .into_iter()
            .map(|(index, email_column)| {
                let flags_column = flags.get(&index).copied();
                ContactSlot {
                    index,
                    email_column,
                    flags_column,
                }
            })
            .collect();

        ContactLayout::new(
            headers.to_vec(),
            ContactIndexSet::from_slots(slots),
            passthrough,
        )
    }
}
