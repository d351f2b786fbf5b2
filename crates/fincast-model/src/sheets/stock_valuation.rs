//! Stock_Valuation sheet: DCF, EV/EBITDA, and P/E valuations

use fincast_core::{Result, Workbook};

use crate::layout::{
    bold, title_style, year_col, FMT_ONE_DECIMAL, FMT_PERCENT, FMT_PRICE, FMT_THOUSANDS,
    FMT_THREE_DECIMALS, LIGHT_BLUE, LIGHT_GREEN, LIGHT_ORANGE, LIGHT_YELLOW, YEARS,
};

pub fn populate(wb: &mut Workbook) -> Result<()> {
    let ws = wb.sheet_mut("Stock_Valuation")?;

    ws.set_value("A1", "STOCK VALUATION MODEL")?;
    ws.set_style("A1", &title_style())?;

    ws.set_value("A3", "Discounted Cash Flow (DCF) Valuation")?;
    ws.set_style("A3", &section_style())?;

    ws.set_value("A5", "WACC (Discount Rate)")?;
    ws.set_formula("B5", "=Assumptions!B22")?;
    ws.amend_style("B5", |s| s.number_format(FMT_PERCENT))?;

    ws.set_value("A6", "Long-term Growth Rate")?;
    ws.set_value("B6", 0.025)?;
    ws.amend_style("B6", |s| s.number_format(FMT_PERCENT))?;

    ws.set_value("A7", "Shares Outstanding")?;
    ws.set_value("B7", 1_000_000.0)?;
    ws.amend_style("B7", |s| s.number_format(FMT_THOUSANDS))?;

    // === Free cash flow table, years B..F plus terminal column G ===
    ws.set_value("A9", "Free Cash Flow")?;
    ws.set_style("A9", &bold())?;
    for (i, year) in YEARS.iter().enumerate() {
        let addr = format!("{}9", year_col(i));
        ws.set_value(&addr, *year)?;
        ws.set_style(&addr, &bold())?;
    }
    ws.set_value("G9", "Terminal")?;
    ws.set_style("G9", &bold())?;

    let fcf_items = [
        "EBIT",
        "Tax Rate",
        "EBIT*(1-Tax Rate)",
        "Plus: Depreciation & Amortization",
        "Less: Capital Expenditures",
        "Less: Change in Working Capital",
        "Free Cash Flow",
    ];
    for (i, item) in fcf_items.iter().enumerate() {
        let row = i + 10;
        ws.set_value(&format!("A{row}"), *item)?;
    }
    ws.set_style("A16", &bold())?;

    // EBIT from operating income; terminal year grows at the LT rate
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}10"), &format!("=Income_Statement!{col}14"))?;
    }
    ws.set_formula("G10", "=F10*(1+B6)")?;

    for col in ["B", "C", "D", "E", "F", "G"] {
        ws.set_formula(&format!("{col}11"), "=Assumptions!B6")?;
        ws.amend_style(&format!("{col}11"), |s| s.number_format(FMT_PERCENT))?;
        ws.set_formula(&format!("{col}12"), &format!("={col}10*(1-{col}11)"))?;
    }

    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}13"), &format!("=OPEX_Budget!{col}7"))?;
    }
    ws.set_formula("G13", "=F13*(1+B6)")?;

    // CapEx and working capital flip sign from the cash flow statement
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}14"), &format!("=-Cash_Flow!{col}12"))?;
        ws.set_formula(&format!("{col}15"), &format!("=-Cash_Flow!{col}8"))?;
    }
    // Terminal capex assumed equal to terminal D&A
    ws.set_formula("G14", "=G13")?;
    ws.set_formula("G15", "=F15*(1+B6)")?;

    for col in ["B", "C", "D", "E", "F", "G"] {
        ws.set_formula(
            &format!("{col}16"),
            &format!("={col}12+{col}13+{col}14+{col}15"),
        )?;
        ws.set_style(&format!("{col}16"), &bold())?;
    }

    // Gordon growth terminal value
    ws.set_value("A18", "Terminal Value")?;
    ws.set_formula("B18", "=G16/(B5-B6)")?;

    ws.set_value("A19", "Discount Factor")?;
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}19"), &format!("=1/(1+B5)^{}", year + 1))?;
        ws.amend_style(&format!("{col}19"), |s| s.number_format(FMT_THREE_DECIMALS))?;
    }
    ws.set_formula("G19", "=F19")?;
    ws.amend_style("G19", |s| s.number_format(FMT_THREE_DECIMALS))?;

    ws.set_value("A20", "Present Value of FCF")?;
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}20"), &format!("={col}16*{col}19"))?;
    }
    ws.set_formula("G20", "=B18*G19")?;

    ws.set_value("A22", "Sum of PV of FCF")?;
    ws.set_style("A22", &bold())?;
    ws.set_formula("B22", "=SUM(B20:F20)")?;
    ws.set_style("B22", &bold())?;

    ws.set_value("A23", "PV of Terminal Value")?;
    ws.set_formula("B23", "=G20")?;

    ws.set_value("A24", "Enterprise Value")?;
    ws.set_style("A24", &bold())?;
    ws.set_formula("B24", "=B22+B23")?;
    ws.set_style("B24", &bold())?;

    ws.set_value("A26", "Less: Net Debt")?;
    ws.set_formula("B26", "=Balance_Sheet!B14-Balance_Sheet!B6")?;

    ws.set_value("A27", "Equity Value")?;
    ws.set_style("A27", &bold())?;
    ws.set_formula("B27", "=B24-B26")?;
    ws.set_style("B27", &bold())?;

    ws.set_value("A28", "Share Price")?;
    ws.set_style("A28", &bold())?;
    ws.set_formula("B28", "=B27/B7")?;
    ws.amend_style("B28", |s| s.bold(true).number_format(FMT_PRICE))?;

    // === Comparable company valuation ===
    ws.set_value("A30", "Comparable Company Valuation")?;
    ws.set_style("A30", &section_style())?;

    ws.set_value("A32", "EV/EBITDA Multiple")?;
    ws.set_value("B32", 8.0)?;
    ws.amend_style("B32", |s| s.number_format(FMT_ONE_DECIMAL))?;

    ws.set_value("A33", "EBITDA (Last Year)")?;
    ws.set_formula("B33", "=Income_Statement!F15")?;

    ws.set_value("A34", "Enterprise Value")?;
    ws.set_formula("B34", "=B32*B33")?;

    ws.set_value("A35", "Less: Net Debt")?;
    ws.set_formula("B35", "=B26")?;

    ws.set_value("A36", "Equity Value")?;
    ws.set_style("A36", &bold())?;
    ws.set_formula("B36", "=B34-B35")?;
    ws.set_style("B36", &bold())?;

    ws.set_value("A37", "Share Price")?;
    ws.set_style("A37", &bold())?;
    ws.set_formula("B37", "=B36/B7")?;
    ws.amend_style("B37", |s| s.bold(true).number_format(FMT_PRICE))?;

    ws.set_value("A39", "P/E Multiple")?;
    ws.set_value("B39", 15.0)?;
    ws.amend_style("B39", |s| s.number_format(FMT_ONE_DECIMAL))?;

    ws.set_value("A40", "EPS (Last Year)")?;
    ws.set_formula("B40", "=Income_Statement!F20/B7")?;
    ws.amend_style("B40", |s| s.number_format(FMT_PRICE))?;

    ws.set_value("A41", "Share Price")?;
    ws.set_style("A41", &bold())?;
    ws.set_formula("B41", "=B39*B40")?;
    ws.amend_style("B41", |s| s.bold(true).number_format(FMT_PRICE))?;

    // FCF table money formats, skipping the tax rate row
    for row in [10u32, 12, 13, 14, 15, 16] {
        ws.amend_range_style(&format!("B{row}:G{row}"), |s| s.number_format(FMT_THOUSANDS))?;
    }
    for row in [18u32, 20, 22, 23, 24, 26, 27, 33, 34, 35, 36] {
        ws.amend_style(&format!("B{row}"), |s| s.number_format(FMT_THOUSANDS))?;
    }

    ws.set_column_width(0, 30.0);
    for col in 1..=6u16 {
        ws.set_column_width(col, 15.0);
    }

    for row in [24u32, 27, 28] {
        ws.amend_range_style(&format!("A{row}:B{row}"), |s| s.fill(LIGHT_BLUE))?;
    }
    for row in [36u32, 37] {
        ws.amend_range_style(&format!("A{row}:B{row}"), |s| s.fill(LIGHT_GREEN))?;
    }
    ws.amend_range_style("A41:B41", |s| s.fill(LIGHT_ORANGE))?;
    ws.amend_range_style("A16:G16", |s| s.fill(LIGHT_YELLOW))?;

    Ok(())
}

fn section_style() -> fincast_core::Style {
    fincast_core::Style::new().bold(true).font_size(12)
}
