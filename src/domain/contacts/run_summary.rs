// ============================================================
// RUN SUMMARY
// ============================================================
// Counters surfaced to the caller after a cleaning run

use serde::Serialize;

use super::{Classification, ContactIndex, Mode, SourceEncoding};

/// Statistics of one cleaning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub mode: Mode,

    /// Encoding the input was decoded with
    pub encoding: SourceEncoding,

    /// Contact indices detected in the header, ascending
    pub contact_indices: Vec<ContactIndex>,

    /// True when the header has no `contact_<i>_email` column
    pub no_contacts_found: bool,

    /// Source records read (header excluded)
    pub rows_read: usize,

    /// Rows produced by the explode step, before any filtering
    pub rows_expanded: usize,

    /// Contact slots skipped because their email cell was blank
    pub empty_contact_slots: usize,

    pub owners: usize,

    pub renters: usize,

    /// Rows whose flags matched neither phrase
    pub unknown_flags: usize,

    pub dropped_by_mode: usize,

    pub dropped_invalid_email: usize,

    pub dropped_duplicate: usize,

    pub rows_written: usize,

    pub processing_time_ms: u64,
}

impl RunSummary {
    pub fn new(mode: Mode, encoding: SourceEncoding, contact_indices: Vec<ContactIndex>) -> Self {
        Self {
            mode,
            encoding,
            no_contacts_found: contact_indices.is_empty(),
            contact_indices,
            rows_read: 0,
            rows_expanded: 0,
            empty_contact_slots: 0,
            owners: 0,
            renters: 0,
            unknown_flags: 0,
            dropped_by_mode: 0,
            dropped_invalid_email: 0,
            dropped_duplicate: 0,
            rows_written: 0,
            processing_time_ms: 0,
        }
    }

    pub fn record_classification(&mut self, classification: Classification) {
        match classification {
            Classification::Owner => self.owners += 1,
            Classification::Renter => self.renters += 1,
            Classification::Unknown => self.unknown_flags += 1,
        }
    }

    pub fn dropped_total(&self) -> usize {
        self.dropped_by_mode + self.dropped_invalid_email + self.dropped_duplicate
    }

    /// Every expanded row is either written or counted under one drop reason
    pub fn is_balanced(&self) -> bool {
        self.rows_expanded == self.dropped_total() + self.rows_written
    }

    /// Human-readable report
    pub fn summary(&self) -> String {
        let slots = if self.no_contacts_found {
            "none (0 contacts found)".to_string()
        } else {
            format!("{:?}", self.contact_indices)
        };

        format!(
            "Cleaning summary ({} mode, {} input):\n\
             - Contact slots: {}\n\
             - Rows read: {}\n\
             - Exploded rows: {} ({} empty slots skipped)\n\
             - Flags: {} owner, {} renter, {} unrecognized\n\
             - Removed by mode: {}\n\
             - Removed invalid emails: {}\n\
             - Removed duplicates: {}\n\
             - Rows written: {}",
            self.mode,
            self.encoding,
            slots,
            self.rows_read,
            self.rows_expanded,
            self.empty_contact_slots,
            self.owners,
            self.renters,
            self.unknown_flags,
            self.dropped_by_mode,
            self.dropped_invalid_email,
            self.dropped_duplicate,
            self.rows_written
        )
    }
}
