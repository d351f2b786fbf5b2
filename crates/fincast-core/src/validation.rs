//! Data validation rules
//!
//! The builder only constrains decimal inputs (positive values and 0..1
//! rates), so that is all this models.

use crate::addr::CellRange;

/// Comparison operator for a decimal validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOperator {
    GreaterThan,
    Between,
}

impl ValidationOperator {
    /// The operator attribute value in worksheet XML
    pub fn xlsx_operator(&self) -> &'static str {
        match self {
            ValidationOperator::GreaterThan => "greaterThan",
            ValidationOperator::Between => "between",
        }
    }
}

/// A decimal data validation applied to one or more ranges
#[derive(Debug, Clone, PartialEq)]
pub struct DataValidation {
    pub ranges: Vec<CellRange>,
    pub operator: ValidationOperator,
    pub formula1: String,
    pub formula2: Option<String>,
    pub error_title: Option<String>,
    pub error_message: Option<String>,
}

impl DataValidation {
    /// Decimal value strictly greater than `bound`
    pub fn decimal_greater_than<S: Into<String>>(bound: S) -> Self {
        Self {
            ranges: Vec::new(),
            operator: ValidationOperator::GreaterThan,
            formula1: bound.into(),
            formula2: None,
            error_title: None,
            error_message: None,
        }
    }

    /// Decimal value between `low` and `high` inclusive
    pub fn decimal_between<S: Into<String>>(low: S, high: S) -> Self {
        Self {
            ranges: Vec::new(),
            operator: ValidationOperator::Between,
            formula1: low.into(),
            formula2: Some(high.into()),
            error_title: None,
            error_message: None,
        }
    }

    /// Set the error alert shown on invalid input
    pub fn with_error<S: Into<String>>(mut self, title: S, message: S) -> Self {
        self.error_title = Some(title.into());
        self.error_message = Some(message.into());
        self
    }

    /// Add a range this validation covers
    pub fn add_range(&mut self, range: CellRange) {
        self.ranges.push(range);
    }
}
