//! Error types for fincast-xlsx

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while writing an XLSX file
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the underlying writer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP container error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The workbook cannot be serialized as given
    #[error("invalid workbook: {0}")]
    InvalidWorkbook(String),
}
