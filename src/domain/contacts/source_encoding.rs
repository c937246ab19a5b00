// ============================================================
// SOURCE ENCODING
// ============================================================
// Which decoder produced the text we cleaned

use std::fmt;

use serde::Serialize;

/// Text encoding the input file was decoded with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceEncoding {
    #[default]
    Utf8,

    /// UTF-8 with a leading byte-order mark
    Utf8Bom,

    /// Latin-1 / Windows-1252 fallback for bytes that are not valid UTF-8
    Windows1252,
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceEncoding::Utf8 => write!(f, "UTF-8"),
            SourceEncoding::Utf8Bom => write!(f, "UTF-8 (BOM)"),
            SourceEncoding::Windows1252 => write!(f, "Windows-1252"),
        }
    }
}
