//! OPEX_Budget sheet: operating expenses driven off revenue ratios

use fincast_core::{Result, Workbook};

use crate::layout::{
    bold, title_style, write_year_header, year_col, FMT_THOUSANDS, LIGHT_ORANGE, YEARS,
};

pub fn populate(wb: &mut Workbook) -> Result<()> {
    let ws = wb.sheet_mut("OPEX_Budget")?;

    ws.set_value("A1", "OPERATING EXPENSES BUDGET")?;
    ws.set_style("A1", &title_style())?;

    write_year_header(ws, "Category", 3)?;

    ws.set_value("A5", "SG&A Expenses")?;
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(
            &format!("{col}5"),
            &format!("=Revenue_Forecast!{col}9*Assumptions!B18"),
        )?;
    }

    ws.set_value("A6", "R&D Expenses")?;
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(
            &format!("{col}6"),
            &format!("=Revenue_Forecast!{col}9*Assumptions!B19"),
        )?;
    }

    ws.set_value("A7", "Depreciation & Amortization")?;
    let depreciation = [100_000.0, 105_000.0, 110_250.0, 115_763.0, 121_551.0];
    for (year, value) in depreciation.iter().enumerate() {
        ws.set_value(&format!("{}7", year_col(year)), *value)?;
    }

    ws.set_value("A9", "Total Operating Expenses")?;
    ws.set_style("A9", &bold())?;
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}9"), &format!("=SUM({col}5:{col}7)"))?;
        ws.set_style(&format!("{col}9"), &bold())?;
    }

    ws.amend_range_style("B5:F9", |s| s.number_format(FMT_THOUSANDS))?;

    ws.set_column_width(0, 25.0);
    for col in 1..=5u16 {
        ws.set_column_width(col, 15.0);
    }

    ws.amend_range_style("A9:F9", |s| s.fill(LIGHT_ORANGE))?;

    Ok(())
}
