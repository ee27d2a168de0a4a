//! A1-style cell references.
//!
//! SpreadsheetML addresses cells as column letters plus a 1-based row
//! number (`"B3"`). The grid parser only needs the column part; the writer
//! needs the full reference.

use crate::error::{Result, XlsxError};

/// Zero-based column index of a cell reference (`"B3"` → 1).
pub(crate) fn column_index(reference: &str) -> Result<usize> {
    let letters: &str = {
        let end = reference
            .find(|ch: char| !ch.is_ascii_alphabetic())
            .unwrap_or(reference.len());
        &reference[..end]
    };
    if letters.is_empty() {
        return Err(XlsxError::invalid_cell_ref(reference));
    }
    let mut index = 0usize;
    for ch in letters.chars() {
        let upper = ch.to_ascii_uppercase();
        index = index * 26 + (upper as usize - 'A' as usize + 1);
    }
    Ok(index - 1)
}

/// Column letters for a zero-based column index (1 → `"B"`, 26 → `"AA"`).
pub(crate) fn column_letters(index: usize) -> String {
    let mut remaining = index + 1;
    let mut letters = Vec::new();
    while remaining > 0 {
        let digit = (remaining - 1) % 26;
        letters.push(b'A' + digit as u8);
        remaining = (remaining - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).expect("ASCII letters")
}

/// Full reference for a 1-based row and zero-based column.
pub(crate) fn cell_reference(row: usize, column: usize) -> String {
    format!("{}{row}", column_letters(column))
}
