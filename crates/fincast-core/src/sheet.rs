//! Worksheet type

use std::collections::BTreeMap;

use fincast_chart::Chart;

use crate::addr::{CellAddress, CellRange};
use crate::conditional_format::ConditionalFormatRule;
use crate::error::{Error, Result};
use crate::style::{Style, StylePool};
use crate::validation::DataValidation;
use crate::value::CellValue;
use crate::{MAX_COLS, MAX_ROWS};

/// A single cell: value plus an index into the sheet's style pool
#[derive(Debug, Clone)]
pub struct Cell {
    /// The cell's value
    pub value: CellValue,
    /// Index into the style pool (0 = default style)
    pub style_index: u32,
}

impl Cell {
    fn new(value: CellValue) -> Self {
        Self {
            value,
            style_index: 0,
        }
    }

    /// Effectively empty: no value and the default style
    fn is_blank(&self) -> bool {
        self.value.is_empty() && self.style_index == 0
    }
}

/// A worksheet: a named sparse grid of cells
///
/// Cells are stored row-major in nested `BTreeMap`s so iteration follows
/// the order the serializer needs. Only non-empty cells are stored.
#[derive(Debug)]
pub struct Worksheet {
    name: String,
    rows: BTreeMap<u32, BTreeMap<u16, Cell>>,
    style_pool: StylePool,
    column_widths: BTreeMap<u16, f64>,
    conditional_formats: Vec<ConditionalFormatRule>,
    data_validations: Vec<DataValidation>,
    charts: Vec<Chart>,
}

impl Worksheet {
    /// Create a new empty worksheet
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
            style_pool: StylePool::new(),
            column_widths: BTreeMap::new(),
            conditional_formats: Vec::new(),
            data_validations: Vec::new(),
            charts: Vec::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell access ===

    /// Get a cell by address string (e.g. "B9")
    pub fn cell(&self, address: &str) -> Result<Option<&Cell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&Cell> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Get a cell value by address string; missing cells read as empty
    pub fn value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self
            .cell_at(addr.row, addr.col)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty))
    }

    /// Get a cell's formula text, if the cell holds a formula
    pub fn formula(&self, address: &str) -> Result<Option<&str>> {
        let addr = CellAddress::parse(address)?;
        Ok(self
            .cell_at(addr.row, addr.col)
            .and_then(|c| c.value.as_formula()))
    }

    // === Cell modification ===

    /// Set a cell value by address string
    pub fn set_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices
    pub fn set_value_at<V: Into<CellValue>>(&mut self, row: u32, col: u16, value: V) -> Result<()> {
        self.check_position(row, col)?;
        self.write(row, col, value.into());
        Ok(())
    }

    /// Set a cell formula by address string
    ///
    /// The formula replaces any previous content of the cell; formula and
    /// literal never coexist.
    pub fn set_formula(&mut self, address: &str, formula: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_formula_at(addr.row, addr.col, formula)
    }

    /// Set a cell formula by row and column indices
    pub fn set_formula_at(&mut self, row: u32, col: u16, formula: &str) -> Result<()> {
        self.check_position(row, col)?;
        self.write(row, col, CellValue::formula(formula));
        Ok(())
    }

    /// Set a cell's style by address string
    pub fn set_style(&mut self, address: &str, style: &Style) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_style_at(addr.row, addr.col, style)
    }

    /// Set a cell's style by row and column indices
    pub fn set_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        self.check_position(row, col)?;
        let index = self.style_pool.get_or_insert(style.clone());
        match self.rows.get_mut(&row).and_then(|r| r.get_mut(&col)) {
            Some(cell) => cell.style_index = index,
            None if index != 0 => {
                let mut cell = Cell::new(CellValue::Empty);
                cell.style_index = index;
                self.rows.entry(row).or_default().insert(col, cell);
            }
            None => {}
        }
        Ok(())
    }

    /// Update a cell's style in place
    ///
    /// Reads the current style (or the default for unstyled cells), passes
    /// it through `f`, and stores the result. Mirrors the way populators
    /// layer formatting onto already-written cells.
    pub fn amend_style<F>(&mut self, address: &str, f: F) -> Result<()>
    where
        F: FnOnce(Style) -> Style,
    {
        let addr = CellAddress::parse(address)?;
        let current = self
            .cell_at(addr.row, addr.col)
            .and_then(|c| self.style_pool.get(c.style_index))
            .cloned()
            .unwrap_or_default();
        self.set_style_at(addr.row, addr.col, &f(current))
    }

    /// Apply the same style amendment to every cell of a range
    pub fn amend_range_style<F>(&mut self, range: &str, f: F) -> Result<()>
    where
        F: Fn(Style) -> Style,
    {
        let range = CellRange::parse(range)?;
        for addr in range.cells() {
            let current = self
                .cell_at(addr.row, addr.col)
                .and_then(|c| self.style_pool.get(c.style_index))
                .cloned()
                .unwrap_or_default();
            self.set_style_at(addr.row, addr.col, &f(current))?;
        }
        Ok(())
    }

    fn write(&mut self, row: u32, col: u16, value: CellValue) {
        match self.rows.get_mut(&row).and_then(|r| r.get_mut(&col)) {
            Some(cell) => {
                cell.value = value;
                if cell.is_blank() {
                    self.remove(row, col);
                }
            }
            None => {
                if !value.is_empty() {
                    self.rows.entry(row).or_default().insert(col, Cell::new(value));
                }
            }
        }
    }

    fn remove(&mut self, row: u32, col: u16) {
        if let Some(row_map) = self.rows.get_mut(&row) {
            row_map.remove(&col);
            if row_map.is_empty() {
                self.rows.remove(&row);
            }
        }
    }

    fn check_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        Ok(())
    }

    // === Iteration ===

    /// Iterate all stored cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &Cell)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, cell)| (row, col, cell)))
    }

    /// Iterate all formula cells as (address, formula text)
    pub fn formula_cells(&self) -> impl Iterator<Item = (CellAddress, &str)> {
        self.iter_cells().filter_map(|(row, col, cell)| {
            cell.value
                .as_formula()
                .map(|text| (CellAddress::new(row, col), text))
        })
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    // === Styles ===

    /// Look up a style by pool index
    pub fn style_by_index(&self, index: u32) -> Option<&Style> {
        self.style_pool.get(index)
    }

    /// The non-default style applied to a cell, if any
    pub fn cell_style(&self, address: &str) -> Result<Option<&Style>> {
        let addr = CellAddress::parse(address)?;
        Ok(self
            .cell_at(addr.row, addr.col)
            .filter(|c| c.style_index != 0)
            .and_then(|c| self.style_pool.get(c.style_index)))
    }

    // === Layout ===

    /// Set a column width in characters
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    /// All custom column widths (column index → width)
    pub fn column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    // === Conditional formats, validations, charts ===

    /// Attach a conditional formatting rule
    pub fn add_conditional_format(&mut self, rule: ConditionalFormatRule) {
        self.conditional_formats.push(rule);
    }

    /// Conditional formatting rules in attach order
    pub fn conditional_formats(&self) -> &[ConditionalFormatRule] {
        &self.conditional_formats
    }

    /// Attach a data validation
    pub fn add_data_validation(&mut self, validation: DataValidation) {
        self.data_validations.push(validation);
    }

    /// Data validations in attach order
    pub fn data_validations(&self) -> &[DataValidation] {
        &self.data_validations
    }

    /// Embed a chart with its top-left corner at the given cell
    pub fn add_chart_at(&mut self, mut chart: Chart, address: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        chart.anchor.row = addr.row;
        chart.anchor.col = addr.col as u32;
        self.charts.push(chart);
        Ok(())
    }

    /// Embedded charts in attach order
    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn values_and_formulas() {
        let mut ws = Worksheet::new("Data");
        ws.set_value("A1", "Total").unwrap();
        ws.set_value("B1", 42.0).unwrap();
        ws.set_formula("C1", "=SUM(B1:B1)").unwrap();

        assert_eq!(ws.value("A1").unwrap(), CellValue::String("Total".into()));
        assert_eq!(ws.value("B1").unwrap(), CellValue::Number(42.0));
        assert_eq!(ws.formula("C1").unwrap(), Some("=SUM(B1:B1)"));
        assert_eq!(ws.value("Z99").unwrap(), CellValue::Empty);
        assert_eq!(ws.cell_count(), 3);
    }

    #[test]
    fn formula_replaces_literal() {
        let mut ws = Worksheet::new("Data");
        ws.set_value("B6", 500_000.0).unwrap();
        ws.set_formula("B6", "=Cash_Flow!B22").unwrap();

        // The formula is the sole content of the cell
        assert_eq!(ws.formula("B6").unwrap(), Some("=Cash_Flow!B22"));
        assert_eq!(ws.cell("B6").unwrap().unwrap().value.as_number(), None);
    }

    #[test]
    fn amend_style_layers_formatting() {
        let mut ws = Worksheet::new("Data");
        ws.set_value("B9", 100.0).unwrap();
        ws.amend_style("B9", |s| s.number_format("#,##0")).unwrap();
        ws.amend_style("B9", |s| s.bold(true)).unwrap();

        let style = ws.cell_style("B9").unwrap().unwrap();
        assert!(style.font.bold);
        assert_eq!(
            style.number_format,
            crate::style::NumberFormat::Custom("#,##0".into())
        );
    }

    #[test]
    fn style_only_cells_survive() {
        let mut ws = Worksheet::new("Data");
        ws.set_style("A3", &Style::new().fill(Color::from_hex(0xFFF2CC)))
            .unwrap();
        assert!(ws.cell("A3").unwrap().is_some());
        assert!(ws.cell_style("A3").unwrap().is_some());
    }

    #[test]
    fn iteration_is_row_major() {
        let mut ws = Worksheet::new("Data");
        ws.set_value("B2", 2.0).unwrap();
        ws.set_value("A1", 1.0).unwrap();
        ws.set_value("B1", 1.5).unwrap();

        let order: Vec<(u32, u16)> = ws.iter_cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, [(0, 0), (0, 1), (1, 1)]);
    }
}
