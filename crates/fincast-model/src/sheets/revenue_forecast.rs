//! Revenue_Forecast sheet: three product lines compounding off the growth
//! assumptions

use fincast_core::{Result, Workbook};

use crate::layout::{
    bold, title_style, write_year_header, year_col, FMT_THOUSANDS, LIGHT_GREEN, YEARS,
};

pub fn populate(wb: &mut Workbook) -> Result<()> {
    let ws = wb.sheet_mut("Revenue_Forecast")?;

    ws.set_value("A1", "REVENUE FORECAST")?;
    ws.set_style("A1", &title_style())?;

    write_year_header(ws, "Category", 3)?;

    let product_lines: [(&str, f64, &str); 3] = [
        ("Product Line 1", 1_000_000.0, "Assumptions!B11"),
        ("Product Line 2", 750_000.0, "Assumptions!B12"),
        ("Product Line 3", 500_000.0, "Assumptions!B13"),
    ];
    for (i, (product, base_revenue, growth_ref)) in product_lines.iter().enumerate() {
        let row = i + 5;
        ws.set_value(&format!("A{row}"), *product)?;
        ws.set_value(&format!("B{row}"), *base_revenue)?;

        // Each later year compounds the previous one by the line's growth rate
        for year in 1..YEARS.len() {
            let col = year_col(year);
            let prev = year_col(year - 1);
            ws.set_formula(
                &format!("{col}{row}"),
                &format!("={prev}{row}*(1+{growth_ref})"),
            )?;
        }
    }

    ws.set_value("A9", "Total Revenue")?;
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

    ws.amend_range_style("A9:F9", |s| s.fill(LIGHT_GREEN))?;

    Ok(())
}
