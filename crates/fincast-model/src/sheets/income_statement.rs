//! Income_Statement sheet: from revenue down to net income, plus margin
//! ratios and a margin trend chart

use fincast_chart::{Chart, ChartType, DataReference, DataSeries};
use fincast_core::{Result, Workbook};

use crate::layout::{
    bold, title_style, write_year_header, year_col, FMT_PERCENT, FMT_THOUSANDS, HEADER_BLUE,
    LIGHT_GRAY, YEARS,
};

pub fn populate(wb: &mut Workbook) -> Result<()> {
    let ws = wb.sheet_mut("Income_Statement")?;

    ws.set_value("A1", "INCOME STATEMENT")?;
    ws.set_style("A1", &title_style())?;

    write_year_header(ws, "Line Item", 3)?;

    let line_items = [
        "Revenue",
        "Cost of Revenue",
        "Gross Profit",
        "Operating Expenses:",
        "   Sales & Marketing",
        "   Research & Development",
        "   General & Administrative",
        "   Depreciation & Amortization",
        "Total Operating Expenses",
        "Operating Income",
        "EBITDA",
        "Interest Expense",
        "Other Income/(Expense)",
        "Earnings Before Tax",
        "Tax Expense",
        "Net Income",
    ];
    let key_items = [
        "Revenue",
        "Gross Profit",
        "Total Operating Expenses",
        "Operating Income",
        "EBITDA",
        "Earnings Before Tax",
        "Net Income",
    ];
    for (i, item) in line_items.iter().enumerate() {
        let row = i + 5;
        ws.set_value(&format!("A{row}"), *item)?;
        if key_items.contains(item) {
            ws.set_style(&format!("A{row}"), &bold())?;
        }
    }

    for year in 0..YEARS.len() {
        let col = year_col(year);

        // Revenue linked to the forecast total
        ws.set_formula(&format!("{col}5"), &format!("=Revenue_Forecast!{col}9"))?;
        ws.set_style(&format!("{col}5"), &bold())?;

        // Cost of revenue at a 75% gross margin target
        ws.set_formula(&format!("{col}6"), &format!("={col}5*0.25"))?;

        ws.set_formula(&format!("{col}7"), &format!("={col}5-{col}6"))?;
        ws.set_style(&format!("{col}7"), &bold())?;

        // Operating expense block, each as a share of revenue
        ws.set_formula(&format!("{col}9"), &format!("={col}5*0.30"))?;
        ws.set_formula(&format!("{col}10"), &format!("={col}5*0.15"))?;
        ws.set_formula(&format!("{col}11"), &format!("={col}5*0.10"))?;
        ws.set_formula(&format!("{col}12"), &format!("={col}5*0.05"))?;

        ws.set_formula(&format!("{col}13"), &format!("=SUM({col}9:{col}12)"))?;
        ws.set_style(&format!("{col}13"), &bold())?;

        ws.set_formula(&format!("{col}14"), &format!("={col}7-{col}13"))?;
        ws.set_style(&format!("{col}14"), &bold())?;

        // EBITDA = operating income + D&A
        ws.set_formula(&format!("{col}15"), &format!("={col}14+{col}12"))?;
        ws.set_style(&format!("{col}15"), &bold())?;

        // Other income: investment income at 0.5% of revenue
        ws.set_formula(&format!("{col}17"), &format!("={col}5*0.005"))?;

        ws.set_formula(&format!("{col}18"), &format!("={col}14-{col}16+{col}17"))?;
        ws.set_style(&format!("{col}18"), &bold())?;

        ws.set_formula(&format!("{col}19"), &format!("={col}18*0.25"))?;

        ws.set_formula(&format!("{col}20"), &format!("={col}18-{col}19"))?;
        ws.set_style(&format!("{col}20"), &bold())?;
    }

    // Interest expense shrinks as debt is repaid
    let interest = [2_000_000.0, 1_800_000.0, 1_500_000.0, 1_200_000.0, 1_000_000.0];
    for (year, value) in interest.iter().enumerate() {
        ws.set_value(&format!("{}16", year_col(year)), *value)?;
    }

    ws.amend_range_style("B5:F20", |s| s.number_format(FMT_THOUSANDS))?;

    // Margin ratios under the statement
    let margins: [(&str, u32); 4] = [
        ("Gross Margin %", 7),
        ("Operating Margin %", 14),
        ("EBITDA Margin %", 15),
        ("Net Margin %", 20),
    ];
    for (i, (item, source_row)) in margins.iter().enumerate() {
        let row = i as u32 + 22;
        ws.set_value(&format!("A{row}"), *item)?;
        ws.set_style(&format!("A{row}"), &bold())?;
        for year in 0..YEARS.len() {
            let col = year_col(year);
            ws.set_formula(&format!("{col}{row}"), &format!("={col}{source_row}/{col}5"))?;
            ws.amend_style(&format!("{col}{row}"), |s| s.number_format(FMT_PERCENT))?;
        }
    }

    let mut chart = Chart::new(ChartType::Line)
        .with_title("Key Margin Trends")
        .with_x_axis_title("Year")
        .with_y_axis_title("Margin %");
    for (i, (item, _)) in margins.iter().enumerate() {
        let row = 22 + i;
        chart.add_series(
            DataSeries::new(DataReference::numbers(format!(
                "Income_Statement!$B${row}:$F${row}"
            )))
            .with_name(*item)
            .with_categories(DataReference::strings("Income_Statement!$B$3:$F$3")),
        );
    }
    ws.add_chart_at(chart, "A28")?;

    ws.set_column_width(0, 30.0);
    for col in 1..=5u16 {
        ws.set_column_width(col, 15.0);
    }

    ws.amend_style("A1", |s| s.fill(HEADER_BLUE))?;
    ws.amend_range_style("A3:F3", |s| s.fill(HEADER_BLUE))?;
    for row in [7u32, 13, 14, 15, 18, 20] {
        ws.amend_range_style(&format!("A{row}:F{row}"), |s| s.fill(LIGHT_GRAY))?;
    }

    Ok(())
}
