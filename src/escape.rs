//! Optional preprocessing that turns non-printable bytes into readable text.
//!
//! The escaped sequence is what gets counted and encoded, so it must be
//! produced once and handed to both passes.

use crate::frequency::Symbol;

fn is_printable(byte: u8) -> bool {
    (32..127).contains(&byte)
}

/// Printable ASCII passes through; every other byte becomes `[0x<octal>]`.
pub fn escape_special_characters(input: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(input.len());
    for &byte in input {
        if is_printable(byte) {
            escaped.push(byte);
        } else {
            escaped.extend_from_slice(format!("[0x{:o}]", byte).as_bytes());
        }
    }
    escaped
}

/// Form of a symbol used in listings.
pub fn display_symbol(symbol: Symbol) -> String {
    match symbol {
        b'\n' => "\\n".to_string(),
        b'\r' => "\\r".to_string(),
        b'\t' => "\\t".to_string(),
        s if is_printable(s) => (s as char).to_string(),
        s => format!("\\x{:02x}", s),
    }
}
