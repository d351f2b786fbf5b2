//! # fincast-core
//!
//! Core data structures for the fincast financial model builder:
//! - [`CellAddress`] and [`CellRange`] - A1-style addressing
//! - [`CellValue`] - literal values and formula text
//! - [`Style`] - the formatting directives the builder emits
//! - [`Worksheet`] and [`Workbook`] - the sheet grid and registry
//!
//! The workbook never computes anything: formulas are carried as text for
//! the spreadsheet application to evaluate after the file is written.
//!
//! ## Example
//!
//! ```rust
//! use fincast_core::Workbook;
//!
//! let mut wb = Workbook::new();
//! wb.add_sheet("Revenue_Forecast").unwrap();
//!
//! let sheet = wb.sheet_mut("Revenue_Forecast").unwrap();
//! sheet.set_value("A9", "Total Revenue").unwrap();
//! sheet.set_formula("B9", "=SUM(B5:B7)").unwrap();
//! ```

pub mod addr;
pub mod conditional_format;
pub mod error;
pub mod sheet;
pub mod style;
pub mod validation;
pub mod value;
pub mod workbook;

pub use addr::{CellAddress, CellRange};
pub use conditional_format::{
    CfOperator, CfRule, CfValueType, ColorScalePoint, ConditionalFormatRule,
};
pub use error::{Error, Result};
pub use sheet::{Cell, Worksheet};
pub use style::{BorderLineStyle, Color, FontStyle, NumberFormat, Style, StylePool};
pub use validation::{DataValidation, ValidationOperator};
pub use value::CellValue;
pub use workbook::Workbook;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
