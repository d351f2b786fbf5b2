//! Cash_Flow sheet: operating, investing, and financing activities, plus
//! the patch that links Balance_Sheet cash to the ending balances here

use fincast_core::{Result, Workbook};

use crate::layout::{
    bold, title_style, write_year_header, year_col, FMT_THOUSANDS, LIGHT_BLUE, LIGHT_GREEN,
    LIGHT_ORANGE, LIGHT_YELLOW, YEARS,
};

pub fn populate(wb: &mut Workbook) -> Result<()> {
    let ws = wb.sheet_mut("Cash_Flow")?;

    ws.set_value("A1", "CASH FLOW STATEMENT")?;
    ws.set_style("A1", &title_style())?;

    write_year_header(ws, "Line Item", 3)?;

    // === Operating activities ===
    ws.set_value("A5", "OPERATING ACTIVITIES")?;
    ws.set_style("A5", &bold())?;

    let op_items = [
        "Net Income",
        "Depreciation & Amortization",
        "Changes in Working Capital",
        "Cash Flow from Operating Activities",
    ];
    for (i, item) in op_items.iter().enumerate() {
        let row = i + 6;
        ws.set_value(&format!("A{row}"), *item)?;
    }
    ws.set_style("A9", &bold())?;

    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}6"), &format!("=Income_Statement!{col}20"))?;
        ws.set_formula(&format!("{col}7"), &format!("=OPEX_Budget!{col}7"))?;
    }

    // Working capital: flat in the base year, widening after
    ws.set_value("B8", 0.0)?;
    let wc_changes = [-20_000.0, -25_000.0, -30_000.0, -35_000.0];
    for (i, wc) in wc_changes.iter().enumerate() {
        ws.set_value(&format!("{}8", year_col(i + 1)), *wc)?;
    }

    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}9"), &format!("=SUM({col}6:{col}8)"))?;
        ws.set_style(&format!("{col}9"), &bold())?;
    }

    // === Investing activities ===
    ws.set_value("A11", "INVESTING ACTIVITIES")?;
    ws.set_style("A11", &bold())?;
    ws.set_value("A12", "Capital Expenditures")?;
    ws.set_value("A13", "Cash Flow from Investing Activities")?;
    ws.set_style("A13", &bold())?;

    let capex = [-200_000.0, -210_000.0, -220_500.0, -231_525.0, -243_101.0];
    for (year, value) in capex.iter().enumerate() {
        ws.set_value(&format!("{}12", year_col(year)), *value)?;
    }
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}13"), &format!("={col}12"))?;
        ws.set_style(&format!("{col}13"), &bold())?;
    }

    // === Financing activities ===
    ws.set_value("A15", "FINANCING ACTIVITIES")?;
    ws.set_style("A15", &bold())?;

    let fin_items = [
        "Debt Repayment",
        "Dividends Paid",
        "Cash Flow from Financing Activities",
    ];
    for (i, item) in fin_items.iter().enumerate() {
        let row = i + 16;
        ws.set_value(&format!("A{row}"), *item)?;
    }
    ws.set_style("A18", &bold())?;

    for year in 0..YEARS.len() {
        ws.set_value(&format!("{}16", year_col(year)), -100_000.0)?;
    }
    let dividends = [-50_000.0, -55_000.0, -60_500.0, -66_550.0, -73_205.0];
    for (year, value) in dividends.iter().enumerate() {
        ws.set_value(&format!("{}17", year_col(year)), *value)?;
    }
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}18"), &format!("=SUM({col}16:{col}17)"))?;
        ws.set_style(&format!("{col}18"), &bold())?;
    }

    // === Cash roll-forward ===
    ws.set_value("A20", "Net Change in Cash")?;
    ws.set_style("A20", &bold())?;
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}20"), &format!("={col}9+{col}13+{col}18"))?;
        ws.set_style(&format!("{col}20"), &bold())?;
    }

    ws.set_value("A21", "Beginning Cash Balance")?;
    ws.set_value("B21", 500_000.0)?;
    for year in 1..YEARS.len() {
        let col = year_col(year);
        let prev = year_col(year - 1);
        // Each year opens with the previous year's ending balance
        ws.set_formula(&format!("{col}21"), &format!("={prev}22"))?;
    }

    ws.set_value("A22", "Ending Cash Balance")?;
    ws.set_style("A22", &bold())?;
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}22"), &format!("={col}21+{col}20"))?;
        ws.set_style(&format!("{col}22"), &bold())?;
    }

    for row in 6..=22u32 {
        ws.amend_range_style(&format!("B{row}:F{row}"), |s| s.number_format(FMT_THOUSANDS))?;
    }

    ws.set_column_width(0, 30.0);
    for col in 1..=5u16 {
        ws.set_column_width(col, 15.0);
    }

    ws.amend_range_style("A9:F9", |s| s.fill(LIGHT_GREEN))?;
    ws.amend_range_style("A13:F13", |s| s.fill(LIGHT_BLUE))?;
    ws.amend_range_style("A18:F18", |s| s.fill(LIGHT_ORANGE))?;
    ws.amend_range_style("A20:F20", |s| s.fill(LIGHT_YELLOW))?;
    ws.amend_range_style("A22:F22", |s| s.fill(LIGHT_YELLOW))?;

    Ok(())
}

/// Patch step: rewrite Balance_Sheet's future-year cash cells to reference
/// the ending balances computed here
///
/// The cells were written as literal placeholders when Balance_Sheet was
/// populated; this runs only after Cash_Flow exists, which the build plan
/// declares and the scheduler verifies.
pub fn link_balance_sheet_cash(wb: &mut Workbook) -> Result<()> {
    let balance_sheet = wb.sheet_mut("Balance_Sheet")?;
    for year in 1..YEARS.len() {
        let col = year_col(year);
        balance_sheet.set_formula(&format!("{col}6"), &format!("=Cash_Flow!{col}22"))?;
    }
    Ok(())
}
