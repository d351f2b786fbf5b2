//! Balance_Sheet sheet: assets, liabilities, and equity with a balance check
//!
//! Future-year cash cells are written as literal placeholders here and
//! rewritten to `=Cash_Flow!<col>22` by the patch step once Cash_Flow is
//! populated.

use fincast_core::{
    CellRange, CfOperator, CfRule, ConditionalFormatRule, Result, Style, Workbook,
};

use crate::layout::{
    bold, title_style, write_year_header, year_col, FMT_THOUSANDS, LIGHT_BLUE, LIGHT_GREEN,
    LIGHT_ORANGE, MEDIUM_GRAY, RED, YEARS,
};

pub fn populate(wb: &mut Workbook) -> Result<()> {
    let ws = wb.sheet_mut("Balance_Sheet")?;

    ws.set_value("A1", "BALANCE SHEET")?;
    ws.set_style("A1", &title_style())?;

    write_year_header(ws, "Line Item", 3)?;

    // === Assets ===
    ws.set_value("A5", "ASSETS")?;
    ws.set_style("A5", &bold())?;

    let asset_items = [
        "Cash and Cash Equivalents",
        "Accounts Receivable",
        "Inventory",
        "Property, Plant & Equipment",
        "Total Assets",
    ];
    for (i, item) in asset_items.iter().enumerate() {
        let row = i + 6;
        ws.set_value(&format!("A{row}"), *item)?;
    }
    ws.set_style("A10", &bold())?;

    // Cash: opening balance for 2025, placeholders for later years until
    // the Cash_Flow patch links them
    ws.set_value("B6", 500_000.0)?;
    for year in 1..YEARS.len() {
        ws.set_value(&format!("{}6", year_col(year)), 0.0)?;
    }

    // Accounts receivable at 15% of revenue
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}7"), &format!("=Revenue_Forecast!{col}9*0.15"))?;
    }

    // Inventory at 10% of COGS
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}8"), &format!("=COGS_Budget!{col}9*0.1"))?;
    }

    // PP&E rolls forward with capex less D&A
    ws.set_value("B9", 2_000_000.0)?;
    let capex = [200_000, 210_000, 220_500, 231_525];
    for (i, capex) in capex.iter().enumerate() {
        let year = i + 1;
        let col = year_col(year);
        let prev = year_col(year - 1);
        ws.set_formula(
            &format!("{col}9"),
            &format!("={prev}9+{capex}-OPEX_Budget!{col}7"),
        )?;
    }

    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}10"), &format!("=SUM({col}6:{col}9)"))?;
        ws.set_style(&format!("{col}10"), &bold())?;
    }

    // === Liabilities ===
    ws.set_value("A12", "LIABILITIES AND EQUITY")?;
    ws.set_style("A12", &bold())?;

    let liability_items = ["Accounts Payable", "Long-term Debt", "Total Liabilities"];
    for (i, item) in liability_items.iter().enumerate() {
        let row = i + 13;
        ws.set_value(&format!("A{row}"), *item)?;
    }
    ws.set_style("A15", &bold())?;

    // Accounts payable at 10% of COGS
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}13"), &format!("=COGS_Budget!{col}9*0.1"))?;
    }

    // Long-term debt with 100k repaid each year
    ws.set_value("B14", 1_000_000.0)?;
    for year in 1..YEARS.len() {
        let col = year_col(year);
        let prev = year_col(year - 1);
        ws.set_formula(&format!("{col}14"), &format!("={prev}14-100000"))?;
    }

    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}15"), &format!("={col}13+{col}14"))?;
        ws.set_style(&format!("{col}15"), &bold())?;
    }

    // === Equity ===
    ws.set_value("A17", "Equity")?;
    ws.set_style("A17", &bold())?;

    let equity_items = ["Common Stock", "Retained Earnings", "Total Equity"];
    for (i, item) in equity_items.iter().enumerate() {
        let row = i + 18;
        ws.set_value(&format!("A{row}"), *item)?;
    }
    ws.set_style("A20", &bold())?;

    ws.set_value("B18", 1_000_000.0)?;
    for year in 1..YEARS.len() {
        let col = year_col(year);
        let prev = year_col(year - 1);
        ws.set_formula(&format!("{col}18"), &format!("={prev}18"))?;
    }

    // Retained earnings roll forward with net income less dividends
    ws.set_value("B19", 500_000.0)?;
    let dividends = [50_000, 55_000, 60_500, 66_550];
    for (i, dividend) in dividends.iter().enumerate() {
        let year = i + 1;
        let col = year_col(year);
        let prev = year_col(year - 1);
        ws.set_formula(
            &format!("{col}19"),
            &format!("={prev}19+Income_Statement!{prev}20-{dividend}"),
        )?;
    }

    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}20"), &format!("={col}18+{col}19"))?;
        ws.set_style(&format!("{col}20"), &bold())?;
    }

    ws.set_value("A21", "Total Liabilities and Equity")?;
    ws.set_style("A21", &bold())?;
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}21"), &format!("={col}15+{col}20"))?;
        ws.set_style(&format!("{col}21"), &bold())?;
    }

    // Balance check row; non-zero differences show up red
    ws.set_value("A23", "Balance Check (Assets - Liabilities - Equity)")?;
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}23"), &format!("={col}10-{col}21"))?;
    }
    ws.add_conditional_format(ConditionalFormatRule::new(
        CellRange::parse("B23:F23")?,
        CfRule::CellIs {
            operator: CfOperator::NotEqual,
            formula: "0".to_string(),
            format: Style::new().font_color(RED),
        },
    ));

    for row in 6..=23u32 {
        if row == 17 {
            continue;
        }
        ws.amend_range_style(&format!("B{row}:F{row}"), |s| s.number_format(FMT_THOUSANDS))?;
    }

    ws.set_column_width(0, 30.0);
    for col in 1..=5u16 {
        ws.set_column_width(col, 15.0);
    }

    ws.amend_range_style("A10:F10", |s| s.fill(LIGHT_BLUE))?;
    ws.amend_range_style("A15:F15", |s| s.fill(LIGHT_ORANGE))?;
    ws.amend_range_style("A20:F20", |s| s.fill(LIGHT_GREEN))?;
    ws.amend_range_style("A21:F21", |s| s.fill(MEDIUM_GRAY))?;

    Ok(())
}
