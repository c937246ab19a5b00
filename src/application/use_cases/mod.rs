pub mod column_detector;
pub mod contact_cleaner;
pub mod email_rules;
pub mod row_classifier;
pub mod row_expander;
