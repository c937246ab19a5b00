// ============================================================
// CSV WRITER
// ============================================================
// Write cleaned contact rows back out as CSV

use std::io::Write;

use csv::{QuoteStyle, Writer, WriterBuilder};

use crate::domain::contacts::{ExpandedRow, RowSink};
use crate::domain::error::{AppError, Result};

/// CSV sink for cleaned rows
pub struct CsvWriter<W: Write> {
    inner: Writer<W>,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        let inner = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .from_writer(writer);
        Self { inner }
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| AppError::IoError(e.error().to_string()))
    }
}

impl<W: Write> RowSink for CsvWriter<W> {
    fn begin(&mut self, headers: &[String]) -> Result<()> {
        self.inner.write_record(headers)?;
        Ok(())
    }

    fn accept(&mut self, row: ExpandedRow) -> Result<()> {
        self.inner.write_record(row.cells())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
