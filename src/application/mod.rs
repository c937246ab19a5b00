pub mod use_cases;

pub use use_cases::column_detector::{
    ColumnDetector, ContactColumn, ContactColumnMatcher, DealMachineMatcher,
};
pub use use_cases::contact_cleaner::{CleanedContacts, ContactCleaner, PreviewSink};
pub use use_cases::row_classifier::{Decision, RowClassifier, Verdict};
pub use use_cases::row_expander::RowExpander;
