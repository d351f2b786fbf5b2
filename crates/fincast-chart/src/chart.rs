//! Chart types

use crate::axis::Axis;
use crate::legend::Legend;
use crate::series::DataSeries;

/// Chart kinds the builder embeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    /// Clustered vertical bars
    Column,
    /// Lines over categories
    Line,
    /// Pie of a single series
    Pie,
    /// XY scatter with markers
    Scatter,
}

/// Chart definition
#[derive(Debug, Clone)]
pub struct Chart {
    /// Chart kind
    pub chart_type: ChartType,
    /// Chart title
    pub title: Option<String>,
    /// Data series
    pub series: Vec<DataSeries>,
    /// Category axis (X)
    pub x_axis: Axis,
    /// Value axis (Y)
    pub y_axis: Axis,
    /// Legend, if shown
    pub legend: Option<Legend>,
    /// Placement on the sheet
    pub anchor: ChartAnchor,
}

impl Chart {
    /// Create a new chart
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            title: None,
            series: Vec::new(),
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            legend: None,
            anchor: ChartAnchor::default(),
        }
    }

    /// Set the chart title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the category (X) axis title
    pub fn with_x_axis_title<S: Into<String>>(mut self, title: S) -> Self {
        self.x_axis.title = Some(title.into());
        self
    }

    /// Set the value (Y) axis title
    pub fn with_y_axis_title<S: Into<String>>(mut self, title: S) -> Self {
        self.y_axis.title = Some(title.into());
        self
    }

    /// Show a legend
    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    /// Add a data series
    pub fn add_series(&mut self, series: DataSeries) {
        self.series.push(series);
    }
}

/// Placement of a chart on a worksheet
///
/// The chart's top-left corner sits at (row, col); the span is in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartAnchor {
    /// Top-left row (0-based)
    pub row: u32,
    /// Top-left column (0-based)
    pub col: u32,
    /// Height in rows
    pub row_span: u32,
    /// Width in columns
    pub col_span: u32,
}

impl Default for ChartAnchor {
    fn default() -> Self {
        Self {
            row: 0,
            col: 0,
            row_span: 15,
            col_span: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{DataReference, DataSeries};

    #[test]
    fn builder_chain() {
        let mut chart = Chart::new(ChartType::Line)
            .with_title("Key Margin Trends")
            .with_x_axis_title("Year")
            .with_y_axis_title("Margin %");
        chart.add_series(DataSeries::new(DataReference::numbers(
            "Income_Statement!$B$22:$F$22",
        )));

        assert_eq!(chart.chart_type, ChartType::Line);
        assert_eq!(chart.title.as_deref(), Some("Key Margin Trends"));
        assert_eq!(chart.x_axis.title.as_deref(), Some("Year"));
        assert_eq!(chart.series.len(), 1);
    }
}
