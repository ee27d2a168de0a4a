//! Error types for workbook operations.

use thiserror::Error;

/// Errors that can occur when encoding or decoding a workbook.
///
/// Every decode failure is total: the caller gets an error and no records.
#[derive(Debug, Error)]
pub enum XlsxError {
    /// The bytes are not a readable ZIP container.
    #[error("not a readable workbook: {message}")]
    InvalidArchive { message: String },

    /// The container holds no resolvable worksheet part.
    #[error("workbook contains no worksheet")]
    MissingSheet,

    /// The first sheet has no rows, or no row usable as a header.
    #[error("worksheet is empty")]
    EmptySheet,

    /// The header row lacks the one required column.
    #[error("no 'name' column in header row (found: {headers})")]
    MissingNameColumn { headers: String },

    /// A workbook part is not well-formed SpreadsheetML.
    #[error("malformed worksheet XML: {message}")]
    InvalidXml { message: String },

    /// A cell carries an unusable reference attribute.
    #[error("invalid cell reference: {reference}")]
    InvalidCellRef { reference: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for workbook operations.
pub type Result<T> = std::result::Result<T, XlsxError>;

impl XlsxError {
    /// Create an InvalidArchive error.
    pub fn invalid_archive(message: impl Into<String>) -> Self {
        Self::InvalidArchive {
            message: message.into(),
        }
    }

    /// Create an InvalidXml error.
    pub fn invalid_xml(message: impl Into<String>) -> Self {
        Self::InvalidXml {
            message: message.into(),
        }
    }

    /// Create an InvalidCellRef error.
    pub fn invalid_cell_ref(reference: impl Into<String>) -> Self {
        Self::InvalidCellRef {
            reference: reference.into(),
        }
    }

    /// Create a MissingNameColumn error listing the headers that were found.
    pub fn missing_name_column(headers: &[String]) -> Self {
        Self::MissingNameColumn {
            headers: if headers.is_empty() {
                "none".to_string()
            } else {
                headers.join(", ")
            },
        }
    }
}

impl From<quick_xml::Error> for XlsxError {
    fn from(e: quick_xml::Error) -> Self {
        Self::invalid_xml(e.to_string())
    }
}

impl From<zip::result::ZipError> for XlsxError {
    fn from(e: zip::result::ZipError) -> Self {
        match e {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::invalid_archive(other.to_string()),
        }
    }
}
