//! # fincast-xlsx
//!
//! Write-only XLSX (Office Open XML) serializer for fincast workbooks.
//!
//! The serializer renders literal values, preserves formula strings
//! verbatim for the spreadsheet application to evaluate, applies style
//! directives, and embeds charts as DrawingML parts. It never reads
//! spreadsheets and never evaluates anything.

mod drawing;
mod error;
mod styles;
mod writer;

pub use error::{Error, Result};
pub use writer::XlsxWriter;
