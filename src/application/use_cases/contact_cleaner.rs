// ============================================================
// CONTACT CLEANER USE CASE
// ============================================================
// Orchestrate decoding, column detection, explode, and filtering

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::column_detector::{ColumnDetector, ContactColumnMatcher, DealMachineMatcher};
use super::row_classifier::{RowClassifier, Verdict};
use super::row_expander::RowExpander;
use crate::domain::contacts::{CleaningConfig, ExpandedRow, RowSink, RunSummary};
use crate::domain::error::Result;
use crate::infrastructure::csv::{CsvParser, DecodedInput};

/// Cleaned rows held in memory
#[derive(Debug, Clone, Default)]
pub struct CleanedContacts {
    pub headers: Vec<String>,
    pub rows: Vec<ExpandedRow>,
}

impl RowSink for CleanedContacts {
    fn begin(&mut self, headers: &[String]) -> Result<()> {
        self.headers = headers.to_vec();
        Ok(())
    }

    fn accept(&mut self, row: ExpandedRow) -> Result<()> {
        self.rows.push(row);
        Ok(())
    }
}

/// Forwards rows to another sink while keeping a formatted copy of the first few
pub struct PreviewSink<S> {
    inner: S,
    limit: usize,
    headers: Vec<String>,
    preview: Vec<String>,
}

impl<S: RowSink> PreviewSink<S> {
    pub fn new(inner: S, limit: usize) -> Self {
        Self {
            inner,
            limit,
            headers: Vec::new(),
            preview: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn preview(&self) -> &[String] {
        &self.preview
    }

    pub fn into_parts(self) -> (S, Vec<String>) {
        (self.inner, self.preview)
    }
}

impl<S: RowSink> RowSink for PreviewSink<S> {
    fn begin(&mut self, headers: &[String]) -> Result<()> {
        self.headers = headers.to_vec();
        self.inner.begin(headers)
    }

    fn accept(&mut self, row: ExpandedRow) -> Result<()> {
        if self.preview.len() < self.limit {
            let number = self.preview.len() + 1;
            self.preview.push(format!(
                "## Record #{}\n{}",
                number,
                row.format_structured(&self.headers)
            ));
        }
        self.inner.accept(row)
    }

    fn finish(&mut self) -> Result<()> {
        self.inner.finish()
    }
}

/// Contact-list cleaning use case
pub struct ContactCleaner<M = DealMachineMatcher> {
    config: CleaningConfig,
    detector: ColumnDetector<M>,
}

impl ContactCleaner {
    pub fn new(config: CleaningConfig) -> Self {
        Self::with_matcher(config, DealMachineMatcher)
    }
}

impl<M: ContactColumnMatcher> ContactCleaner<M> {
    pub fn with_matcher(config: CleaningConfig, matcher: M) -> Self {
        Self {
            config,
            detector: ColumnDetector::with_matcher(matcher),
        }
    }

    /// Read, decode and clean a CSV file into `sink`
    pub fn clean_file<S: RowSink>(&self, path: &Path, sink: &mut S) -> Result<RunSummary> {
        let input = self.parser().read_file(path)?;
        info!(
            "Cleaning contacts from {} ({} bytes, {})",
            path.display(),
            input.content.len(),
            input.encoding
        );
        self.clean_input(&input, sink)
    }

    /// Clean in-memory UTF-8 CSV text
    pub fn clean_content(&self, content: &str) -> Result<(CleanedContacts, RunSummary)> {
        let mut cleaned = CleanedContacts::default();
        let summary = self.clean_input(&DecodedInput::utf8(content), &mut cleaned)?;
        Ok((cleaned, summary))
    }

    /// Run the pipeline over decoded input. The sink is only started once
    /// the header has been read.
    pub fn clean_input<S: RowSink>(&self, input: &DecodedInput, sink: &mut S) -> Result<RunSummary> {
        let start = Instant::now();

        let records = self.parser().records(&input.content)?;
        let layout = self.detector.detect(records.headers());
        let contacts = layout.contacts();

        let mut summary = RunSummary::new(self.config.mode, input.encoding, contacts.indices());
        if contacts.is_empty() {
            warn!("No contact_N_email columns found (0 contacts found); output will be empty");
        } else {
            info!("Detected contact slots: {:?}", summary.contact_indices);
        }

        sink.begin(&layout.output_headers())?;

        let expander = RowExpander::new(&layout);
        let mut classifier = RowClassifier::new(&self.config);

        for record in records {
            let row = record?;
            summary.rows_read += 1;

            let expanded = expander.expand(&row);
            summary.empty_contact_slots += contacts.len() - expanded.len();
            summary.rows_expanded += expanded.len();

            for contact in expanded {
                let decision = classifier.evaluate(&contact);
                summary.record_classification(decision.classification);

                match decision.verdict {
                    Verdict::Keep => {
                        summary.rows_written += 1;
                        sink.accept(contact)?;
                    }
                    Verdict::DroppedByMode => {
                        summary.dropped_by_mode += 1;
                        debug!(
                            record = contact.record_number,
                            contact = %contact.contact_index,
                            "dropped {} contact in {} mode",
                            decision.classification,
                            self.config.mode
                        );
                    }
                    Verdict::InvalidEmail => {
                        summary.dropped_invalid_email += 1;
                        debug!(
                            record = contact.record_number,
                            contact = %contact.contact_index,
                            "dropped malformed email {:?}",
                            contact.email.as_str()
                        );
                    }
                    Verdict::Duplicate => {
                        summary.dropped_duplicate += 1;
                        debug!(
                            record = contact.record_number,
                            contact = %contact.contact_index,
                            "dropped duplicate email {:?}",
                            contact.email.as_str()
                        );
                    }
                }
            }
        }

        sink.finish()?;
        summary.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Cleaning complete: {} rows read, {} exploded, {} written ({} unrecognized flags)",
            summary.rows_read, summary.rows_expanded, summary.rows_written, summary.unknown_flags
        );

        Ok(summary)
    }

    fn parser(&self) -> CsvParser {
        CsvParser::new().with_trim(self.config.trim_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contacts::{EmailRule, Mode};
    use crate::domain::error::AppError;
    use crate::infrastructure::csv::CsvWriter;

    const EXPORT_CSV: &str = "\
id,contact_1_email,contact_1_flags,contact_2_email,contact_2_flags
7,a@x.com,Likely Owner,b@y.com,\"resident, likely renting\"";

    fn cleaner(mode: Mode, dedupe: bool) -> ContactCleaner {
        ContactCleaner::new(CleaningConfig::new(mode, dedupe))
    }

    fn emails(cleaned: &CleanedContacts) -> Vec<&str> {
        cleaned.rows.iter().map(|r| r.email.as_str()).collect()
    }

    #[test]
    fn test_clone_mode_keeps_owner() {
        let (cleaned, summary) = cleaner(Mode::Clone, false).clean_content(EXPORT_CSV).unwrap();

        assert_eq!(cleaned.headers, vec!["id", "Email", "Flags"]);
        assert_eq!(emails(&cleaned), vec!["a@x.com"]);
        assert_eq!(cleaned.rows[0].flags.as_str(), "Likely Owner");
        assert_eq!(cleaned.rows[0].passthrough, vec!["7"]);
        assert_eq!(summary.dropped_by_mode, 1);
    }

    #[test]
    fn test_owner_only_mode_keeps_renter() {
        let (cleaned, summary) = cleaner(Mode::OwnerOnly, false).clean_content(EXPORT_CSV).unwrap();

        assert_eq!(emails(&cleaned), vec!["b@y.com"]);
        assert_eq!(summary.owners, 1);
        assert_eq!(summary.renters, 1);
    }

    #[test]
    fn test_empty_first_slot() {
        let content = "\
id,contact_1_email,contact_1_flags,contact_2_email,contact_2_flags
9,,,c@z.com,";
        let (cleaned, summary) = cleaner(Mode::Clone, false).clean_content(content).unwrap();

        assert_eq!(summary.rows_expanded, 1);
        assert_eq!(summary.empty_contact_slots, 1);
        assert_eq!(cleaned.rows[0].contact_index, 2u64);
    }

    #[test]
    fn test_index_beyond_u64_keeps_its_emails() {
        let content = "\
id,contact_1_email,contact_99999999999999999999999_email
7,a@x.com,z@x.com";
        let (cleaned, summary) = cleaner(Mode::Clone, false).clean_content(content).unwrap();

        assert_eq!(cleaned.headers, vec!["id", "Email", "Flags"]);
        assert_eq!(emails(&cleaned), vec!["a@x.com", "z@x.com"]);
        assert_eq!(cleaned.rows[1].contact_index.as_str(), "99999999999999999999999");
        assert_eq!(summary.contact_indices.len(), 2);
        assert_eq!(summary.rows_written, 2);
    }

    #[test]
    fn test_invalid_email_filtered() {
        let content = "\
id,contact_1_email,contact_1_flags
1,not-an-email,Likely Owner
2,ok@x.com,";
        let config = CleaningConfig::new(Mode::OwnerOnly, false).with_invalid_email_filter(EmailRule::Basic);
        let (cleaned, summary) = ContactCleaner::new(config).clean_content(content).unwrap();

        // owner row is dropped by mode before the email check
        assert_eq!(summary.dropped_by_mode, 1);
        assert_eq!(emails(&cleaned), vec!["ok@x.com"]);

        let config = CleaningConfig::new(Mode::Clone, false).with_invalid_email_filter(EmailRule::Basic);
        let (cleaned, summary) = ContactCleaner::new(config).clean_content(content).unwrap();
        assert_eq!(summary.dropped_invalid_email, 1);
        assert_eq!(emails(&cleaned), vec!["ok@x.com"]);
    }

    #[test]
    fn test_dedupe_across_rows() {
        let content = "\
id,contact_1_email
1,A@X.com
2,a@x.com";
        let (cleaned, summary) = cleaner(Mode::Clone, true).clean_content(content).unwrap();

        assert_eq!(emails(&cleaned), vec!["A@X.com"]);
        assert_eq!(cleaned.rows[0].record_number, 1);
        assert_eq!(summary.dropped_duplicate, 1);
    }

    #[test]
    fn test_no_contact_columns_is_not_an_error() {
        let content = "id,address\n1,Main St\n2,Oak Ave";
        let (cleaned, summary) = cleaner(Mode::Clone, true).clean_content(content).unwrap();

        assert!(cleaned.rows.is_empty());
        assert!(summary.no_contacts_found);
        assert_eq!(summary.rows_read, 2);
        assert_eq!(cleaned.headers, vec!["id", "address", "Email", "Flags"]);
    }

    #[test]
    fn test_empty_input_is_schema_error() {
        let mut sink = CleanedContacts::default();
        let err = cleaner(Mode::Clone, true)
            .clean_input(&DecodedInput::utf8(""), &mut sink)
            .unwrap_err();

        assert!(matches!(err, AppError::SchemaError(_)));
        assert!(sink.headers.is_empty());
    }

    #[test]
    fn test_summary_is_balanced() {
        let content = "\
id,contact_1_email,contact_1_flags,contact_2_email,contact_2_flags,contact_3_email
1,a@x.com,likely owner,b@x.com,likely renting,bad
2,A@x.com,,c@x.com,resident,
3,,,,,d@x.com";
        let config = CleaningConfig::new(Mode::Clone, true).with_invalid_email_filter(EmailRule::Basic);
        let (cleaned, summary) = ContactCleaner::new(config).clean_content(content).unwrap();

        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.rows_expanded, 6);
        assert_eq!(summary.empty_contact_slots, 3);
        assert_eq!(summary.dropped_by_mode, 1);
        assert_eq!(summary.dropped_invalid_email, 1);
        assert_eq!(summary.dropped_duplicate, 1);
        assert_eq!(summary.rows_written, 3);
        assert!(summary.is_balanced());
        assert_eq!(emails(&cleaned), vec!["a@x.com", "c@x.com", "d@x.com"]);
    }

    #[test]
    fn test_output_order_follows_rows_then_index() {
        let content = "\
contact_2_email,id,contact_1_email
b1@x.com,1,a1@x.com
b2@x.com,2,a2@x.com";
        let (cleaned, _) = cleaner(Mode::Clone, false).clean_content(content).unwrap();
        assert_eq!(emails(&cleaned), vec!["a1@x.com", "b1@x.com", "a2@x.com", "b2@x.com"]);
    }

    #[test]
    fn test_trim_fields_option() {
        let content = "id,contact_1_email,contact_1_flags\n  7 , a@x.com ,  Likely Owner  ";
        let config = CleaningConfig::new(Mode::Clone, false).with_trim_fields(true);
        let (cleaned, _) = ContactCleaner::new(config).clean_content(content).unwrap();

        assert_eq!(cleaned.rows[0].passthrough, vec!["7"]);
        assert_eq!(cleaned.rows[0].flags.as_str(), "Likely Owner");
    }

    #[test]
    fn test_passthrough_untouched_without_trim() {
        let content = "id,contact_1_email\n  7 ,a@x.com";
        let (cleaned, _) = cleaner(Mode::Clone, false).clean_content(content).unwrap();
        assert_eq!(cleaned.rows[0].passthrough, vec!["  7 "]);
    }

    #[test]
    fn test_writes_csv_through_sink() {
        let mut writer = CsvWriter::new(Vec::new());
        let summary = cleaner(Mode::OwnerOnly, true)
            .clean_input(&DecodedInput::utf8(EXPORT_CSV), &mut writer)
            .unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        assert_eq!(summary.rows_written, 1);
        assert_eq!(output, "id,Email,Flags\n7,b@y.com,\"resident, likely renting\"\n");
    }

    #[test]
    fn test_preview_sink_formats_first_rows() {
        let content = "id,contact_1_email,contact_2_email\n1,a@x.com,b@x.com\n2,c@x.com,";
        let mut sink = PreviewSink::new(CleanedContacts::default(), 2);
        cleaner(Mode::Clone, false)
            .clean_input(&DecodedInput::utf8(content), &mut sink)
            .unwrap();

        assert_eq!(sink.preview().len(), 2);
        assert_eq!(sink.preview()[0], "## Record #1\n- id: 1\n- Email: a@x.com");
        let (inner, _) = sink.into_parts();
        assert_eq!(inner.rows.len(), 3);
    }

    #[test]
    fn test_clean_file_reports_encoding() {
        use crate::domain::contacts::SourceEncoding;
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xEF\xBB\xBFid,contact_1_email\n1,a@x.com\n").unwrap();

        let mut cleaned = CleanedContacts::default();
        let summary = cleaner(Mode::Clone, false)
            .clean_file(file.path(), &mut cleaned)
            .unwrap();

        assert_eq!(summary.encoding, SourceEncoding::Utf8Bom);
        assert_eq!(cleaned.headers[0], "id");
        assert_eq!(cleaned.rows.len(), 1);
    }
}
