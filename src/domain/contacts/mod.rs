// ============================================================
// CONTACT DOMAIN LAYER
// ============================================================
// Core types and value objects for contact-list cleaning
// No I/O, only serde for summary/config serialization

mod cleaning_config;
mod contact_row;
mod contact_slot;
mod mode;
mod row_sink;
mod run_summary;
mod source_encoding;

pub use cleaning_config::{CleaningConfig, CleaningSettings, EmailRule};
pub use contact_row::{ContactEmail, ExpandedRow, Flags, SourceRow, EMAIL_COLUMN, FLAGS_COLUMN};
pub use contact_slot::{ContactIndex, ContactIndexSet, ContactLayout, ContactSlot};
pub use mode::{Classification, Mode};
pub use row_sink::RowSink;
pub use run_summary::RunSummary;
pub use source_encoding::SourceEncoding;
