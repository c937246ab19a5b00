use super::ExpandedRow;
use crate::domain::error::Result;

/// Destination for cleaned rows.
///
/// `begin` is only called once the input header has been accepted, so a
/// sink that never sees `begin` must not produce any output.
pub trait RowSink {
    fn begin(&mut self, headers: &[String]) -> Result<()>;

    fn accept(&mut self, row: ExpandedRow) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
