//! Error types for fincast-formula

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by reference extraction, validation, and scheduling
#[derive(Debug, Error)]
pub enum Error {
    /// A reference token did not match the reference grammar
    #[error("formula parse error: {0}")]
    Parse(String),

    /// A formula references a sheet that was never created
    #[error("reference to unknown sheet '{sheet}' from {cell}")]
    UnknownSheet { sheet: String, cell: String },

    /// A formula's reference range contains the cell itself
    #[error("cell {cell} references itself via {reference}")]
    SelfReference { cell: String, reference: String },

    /// The sheet-level reference graph contains a cycle
    #[error("circular sheet dependency: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },

    /// The declared build order populates a sheet before its dependency
    #[error(
        "build order violation: {sheet} is populated before {depends_on}, \
         which its formulas reference"
    )]
    OrderViolation { sheet: String, depends_on: String },

    /// A sheet appears in the workbook but not in the build plan
    #[error("sheet '{0}' has no populate step in the build plan")]
    UnplannedSheet(String),
}
