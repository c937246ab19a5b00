// ============================================================
// ROW CLASSIFIER / FILTER
// ============================================================
// Mode rule, optional email validity filter, optional dedup by email

use std::collections::HashSet;

use super::email_rules::looks_valid;
use crate::domain::contacts::{
    Classification, CleaningConfig, EmailRule, ExpandedRow, Mode,
};

/// Why a row was kept or dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    DroppedByMode,
    InvalidEmail,
    Duplicate,
}

/// Outcome of evaluating one expanded row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub classification: Classification,
    pub verdict: Verdict,
}

impl Decision {
    pub fn is_kept(&self) -> bool {
        self.verdict == Verdict::Keep
    }
}

/// Stateful filter for one run. Owns the set of emails already emitted.
pub struct RowClassifier {
    mode: Mode,
    email_rule: Option<EmailRule>,
    dedupe: bool,
    seen: HashSet<String>,
}

impl RowClassifier {
    pub fn new(config: &CleaningConfig) -> Self {
        Self {
            mode: config.mode,
            email_rule: config.active_email_rule(),
            dedupe: config.dedupe_by_email,
            seen: HashSet::new(),
        }
    }

    pub fn classify(&self, row: &ExpandedRow) -> Classification {
        Classification::from_flags(&row.flags)
    }

    /// Filters run in order: mode, email validity, dedup. Only rows that
    /// survive every filter are recorded in the dedup set.
    pub fn evaluate(&mut self, row: &ExpandedRow) -> Decision {
        let classification = self.classify(row);
        let verdict = self.verdict(row, classification);
        Decision {
            classification,
            verdict,
        }
    }

    fn verdict(&mut self, row: &ExpandedRow, classification: Classification) -> Verdict {
        if !self.mode.keeps(classification) {
            return Verdict::DroppedByMode;
        }

        if let Some(rule) = self.email_rule {
            if !looks_valid(row.email.as_str(), rule) {
                return Verdict::InvalidEmail;
            }
        }

        if self.dedupe && !self.seen.insert(row.email.dedupe_key()) {
            return Verdict::Duplicate;
        }

        Verdict::Keep
    }

    /// Keep the surviving rows, preserving order
    #[cfg(test)]
    pub fn filter(&mut self, rows: impl IntoIterator<Item = ExpandedRow>) -> Vec<ExpandedRow> {
        rows.into_iter()
            .filter(|row| self.evaluate(row).is_kept())
            .collect()
    }
}
