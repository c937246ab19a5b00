// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Input decoding, CSV record streaming, and CSV output

mod csv_parser;
mod csv_writer;
mod encoding;

pub use csv_parser::{CsvParser, CsvRecords, DecodedInput};
pub use csv_writer::CsvWriter;
pub use encoding::decode_input;
