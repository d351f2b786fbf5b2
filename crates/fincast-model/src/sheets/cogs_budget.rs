//! COGS_Budget sheet: per-line cost of goods sold as a ratio of revenue

use fincast_core::{Result, Workbook};

use crate::layout::{
    bold, title_style, write_year_header, year_col, FMT_THOUSANDS, LIGHT_RED, YEARS,
};

pub fn populate(wb: &mut Workbook) -> Result<()> {
    let ws = wb.sheet_mut("COGS_Budget")?;

    ws.set_value("A1", "COST OF GOODS SOLD BUDGET")?;
    ws.set_style("A1", &title_style())?;

    write_year_header(ws, "Category", 3)?;

    for line in 0..3usize {
        let row = line + 5;
        ws.set_value(&format!("A{row}"), format!("COGS Product Line {}", line + 1))?;

        // Row 5..7 of Revenue_Forecast carries the matching product line
        let revenue_row = line + 5;
        for year in 0..YEARS.len() {
            let col = year_col(year);
            ws.set_formula(
                &format!("{col}{row}"),
                &format!("=Revenue_Forecast!{col}{revenue_row}*Assumptions!B17"),
            )?;
        }
    }

    ws.set_value("A9", "Total COGS")?;
    ws.set_style("A9", &bold())?;
    for year in 0..YEARS.len() {
        let col = year_col(year);
        ws.set_formula(&format!("{col}9"), &format!("=SUM({col}5:{col}7)"))?;
        ws.set_style(&format!("{col}9"), &bold())?;
    }

    ws.amend_range_style("B5:F9", |s| s.number_format(FMT_THOUSANDS))?;

    ws.set_column_width(0, 20.0);
    for col in 1..=5u16 {
        ws.set_column_width(col, 15.0);
    }

    ws.amend_range_style("A9:F9", |s| s.fill(LIGHT_RED))?;

    Ok(())
}
