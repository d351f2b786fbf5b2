//! Conditional formatting rules
//!
//! Only the rule kinds this builder emits are modeled: a cell-is comparison
//! with a differential format, and a three-point color scale.

use crate::addr::CellRange;
use crate::style::{Color, Style};

/// Comparison operator for cell-is rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfOperator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
}

impl CfOperator {
    /// The operator attribute value in worksheet XML
    pub fn xlsx_operator(&self) -> &'static str {
        match self {
            CfOperator::Equal => "equal",
            CfOperator::NotEqual => "notEqual",
            CfOperator::GreaterThan => "greaterThan",
            CfOperator::LessThan => "lessThan",
        }
    }
}

/// Anchor kind for a color-scale point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CfValueType {
    Min,
    Max,
    Percentile,
}

impl CfValueType {
    /// The cfvo type attribute value
    pub fn xlsx_type(&self) -> &'static str {
        match self {
            CfValueType::Min => "min",
            CfValueType::Max => "max",
            CfValueType::Percentile => "percentile",
        }
    }
}

/// One anchor point of a color scale
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScalePoint {
    pub value_type: CfValueType,
    /// Anchor value; required for percentile points
    pub value: Option<f64>,
    pub color: Color,
}

impl ColorScalePoint {
    pub fn min(color: Color) -> Self {
        Self {
            value_type: CfValueType::Min,
            value: None,
            color,
        }
    }

    pub fn max(color: Color) -> Self {
        Self {
            value_type: CfValueType::Max,
            value: None,
            color,
        }
    }

    pub fn percentile(value: f64, color: Color) -> Self {
        Self {
            value_type: CfValueType::Percentile,
            value: Some(value),
            color,
        }
    }
}

/// The rule body
#[derive(Debug, Clone, PartialEq)]
pub enum CfRule {
    /// Compare each cell against a formula and apply a differential format
    CellIs {
        operator: CfOperator,
        formula: String,
        format: Style,
    },
    /// Three-point color scale
    ColorScale([ColorScalePoint; 3]),
}

/// A conditional format applied to a range
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalFormatRule {
    pub range: CellRange,
    pub rule: CfRule,
}

impl ConditionalFormatRule {
    pub fn new(range: CellRange, rule: CfRule) -> Self {
        Self { range, rule }
    }
}
