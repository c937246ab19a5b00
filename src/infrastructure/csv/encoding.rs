// ============================================================
// INPUT DECODING
// ============================================================
// Turn raw export bytes into text, whatever the spreadsheet saved them as

use crate::domain::contacts::SourceEncoding;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode raw file bytes: UTF-8 (BOM stripped) first, Windows-1252 otherwise
pub fn decode_input(bytes: &[u8]) -> (String, SourceEncoding) {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        if let Ok(text) = std::str::from_utf8(rest) {
            return (text.to_string(), SourceEncoding::Utf8Bom);
        }
        return (decode_windows_1252(rest), SourceEncoding::Windows1252);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), SourceEncoding::Utf8),
        Err(_) => (decode_windows_1252(bytes), SourceEncoding::Windows1252),
    }
}

fn decode_windows_1252(bytes: &[u8]) -> String {
    let (text, _had_errors) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}
