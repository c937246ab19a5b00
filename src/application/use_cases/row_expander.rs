// ============================================================
// ROW EXPANDER
// ============================================================
// Explode one wide source row into one row per non-empty contact email

use crate::domain::contacts::{ContactEmail, ContactLayout, ExpandedRow, Flags, SourceRow};

pub struct RowExpander<'a> {
    layout: &'a ContactLayout,
}

impl<'a> RowExpander<'a> {
    pub fn new(layout: &'a ContactLayout) -> Self {
        Self { layout }
    }

    /// One row per contact slot with a non-blank email, ascending by index
    pub fn expand(&self, row: &SourceRow) -> Vec<ExpandedRow> {
        let slots = self.layout.contacts().slots();
        if slots.is_empty() {
            return Vec::new();
        }

        let passthrough: Vec<String> = self
            .layout
            .passthrough_positions()
            .iter()
            .map(|&pos| row.cell(pos).to_string())
            .collect();

        slots
            .iter()
            .filter_map(|slot| {
                let email = ContactEmail::parse(row.cell(slot.email_column))?;
                let flags = slot
                    .flags_column
                    .map(|pos| Flags::new(row.cell(pos)))
                    .unwrap_or_default();

                Some(ExpandedRow {
                    record_number: row.record_number,
                    contact_index: slot.index.clone(),
                    passthrough: passthrough.clone(),
                    email,
                    flags,
                })
            })
            .collect()
    }

    /// Expand every row in input order
    #[cfg(test)]
    pub fn expand_all<'r>(&self, rows: impl IntoIterator<Item = &'r SourceRow>) -> Vec<ExpandedRow> {
        rows.into_iter().flat_map(|row| self.expand(row)).collect()
    }
}
