//! XLSX workbook reader and writer for the SDS register.
//!
//! The register travels as a single-sheet Office Open XML workbook: a
//! header row `name, producer, sdsDate, link, notes, ghs` followed by one
//! row per substance. The writer emits a minimal workbook with
//! inline-string cells; the reader accepts anything Excel-shaped — shared
//! strings, extra columns, reordered columns — as long as the first sheet
//! carries a `name` column.
//!
//! Decoding is all-or-nothing: either every row of the first sheet becomes
//! a record, or the whole decode fails with an [`XlsxError`] and no partial
//! sequence escapes.
//!
//! # Example
//!
//! ```
//! use sds_model::SubstanceDraft;
//! use sds_xlsx::{decode_workbook, encode_workbook};
//!
//! let records = vec![SubstanceDraft::new().name("Acetone").build()];
//! let bytes = encode_workbook(&records).unwrap();
//! assert_eq!(decode_workbook(&bytes).unwrap(), records);
//! ```

mod cellref;
mod error;
mod reader;
mod writer;

pub use error::{Result, XlsxError};
pub use reader::{decode_workbook, read_register};
pub use writer::{encode_workbook, write_register};

/// Column order of the exported sheet. Decoding matches columns by header
/// text, so this order is a convention, not a requirement.
pub const COLUMNS: [&str; 6] = ["name", "producer", "sdsDate", "link", "notes", "ghs"];

/// Name of the single sheet in an exported workbook.
pub const SHEET_NAME: &str = "SDS";

/// File name the register is exported under.
pub const EXPORT_FILE_NAME: &str = "sds_verification.xlsx";
