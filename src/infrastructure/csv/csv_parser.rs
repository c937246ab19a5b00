// ============================================================
// CSV PARSER
// ============================================================
// Decode contact exports and stream their records

use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord, Trim};

use super::encoding::decode_input;
use crate::domain::contacts::{SourceEncoding, SourceRow};
use crate::domain::error::{AppError, Result};

/// Input file decoded to text
#[derive(Debug, Clone)]
pub struct DecodedInput {
    pub content: String,
    pub encoding: SourceEncoding,
}

impl DecodedInput {
    pub fn utf8(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            encoding: SourceEncoding::Utf8,
        }
    }
}

/// CSV parser for contact exports
pub struct CsvParser {
    /// Whether to trim whitespace from data cells (headers are never trimmed)
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { trim: false }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Read a file and decode it to text
    pub fn read_file(&self, path: &Path) -> Result<DecodedInput> {
        let bytes = std::fs::read(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let (content, encoding) = decode_input(&bytes);
        Ok(DecodedInput { content, encoding })
    }

    /// Open CSV text for record-by-record reading.
    ///
    /// Fails with `SchemaError` when there is no header row.
    pub fn records<'a>(&self, content: &'a str) -> Result<CsvRecords<'a>> {
        let mut reader = ReaderBuilder::new()
            .trim(if self.trim { Trim::Fields } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::SchemaError(format!("Failed to read CSV headers: {}", e)))?;

        if headers.is_empty() {
            return Err(AppError::SchemaError(
                "input has no header row".to_string(),
            ));
        }

        let headers: Vec<String> = headers.iter().map(str::to_string).collect();

        Ok(CsvRecords {
            headers,
            reader,
            record: StringRecord::new(),
            next_record_number: 1,
        })
    }

    /// Parse CSV text fully into memory
    pub fn parse_content(&self, content: &str) -> Result<(Vec<String>, Vec<SourceRow>)> {
        let records = self.records(content)?;
        let headers = records.headers().to_vec();
        let rows = records.collect::<Result<Vec<_>>>()?;
        Ok((headers, rows))
    }
}

/// Streaming view over the records of a CSV document
pub struct CsvRecords<'a> {
    headers: Vec<String>,
    reader: Reader<&'a [u8]>,
    record: StringRecord,
    next_record_number: u64,
}

impl CsvRecords<'_> {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for CsvRecords<'_> {
    type Item = Result<SourceRow>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                let number = self.next_record_number;
                self.next_record_number += 1;
                let cells = self.record.iter().map(str::to_string).collect();
                Some(Ok(SourceRow::new(number, cells)))
            }
            Ok(false) => None,
            Err(e) => Some(Err(AppError::ParseError(format!(
                "Failed to parse CSV record {}: {}",
                self.next_record_number, e
            )))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_simple_csv() {
        let content = "id,contact_1_email\n7,a@x.com\n8,b@y.com";
        let (headers, rows) = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(headers, vec!["id", "contact_1_email"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].record_number, 1);
        assert_eq!(rows[1].cell(1), "b@y.com");
    }

    #[test]
    fn test_quoted_cells_keep_commas() {
        let content = "id,contact_1_flags\n7,\"resident, likely renting\"";
        let (_, rows) = CsvParser::new().parse_content(content).unwrap();
        assert_eq!(rows[0].cell(1), "resident, likely renting");
    }

    #[test]
    fn test_empty_input_is_schema_error() {
        let err = CsvParser::new().records("").err().unwrap();
        assert!(matches!(err, AppError::SchemaError(_)));
    }

    #[test]
    fn test_header_only_has_no_rows() {
        let (headers, rows) = CsvParser::new().parse_content("id,name\n").unwrap();
        assert_eq!(headers.len(), 2);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_ragged_rows_are_accepted() {
        let content = "a,b,c\n1\n1,2,3,4";
        let (_, rows) = CsvParser::new().parse_content(content).unwrap();
        assert_eq!(rows[0].cell(2), "");
        assert_eq!(rows[1].cells.len(), 4);
    }

    #[test]
    fn test_trim_applies_to_cells_not_headers() {
        let content = " id ,name\n  7 , Ann ";
        let (headers, rows) = CsvParser::new()
            .with_trim(true)
            .parse_content(content)
            .unwrap();

        assert_eq!(headers[0], " id ");
        assert_eq!(rows[0].cells, vec!["7", "Ann"]);
    }

    #[test]
    fn test_read_file_falls_back_to_latin1() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"id,city\n1,Montr\xe9al\n").unwrap();

        let decoded = CsvParser::new().read_file(file.path()).unwrap();
        assert_eq!(decoded.encoding, SourceEncoding::Windows1252);
        assert!(decoded.content.contains("Montréal"));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvParser::new()
            .read_file(&dir.path().join("missing.csv"))
            .unwrap_err();
        assert!(matches!(err, AppError::IoError(_)));
    }
}
