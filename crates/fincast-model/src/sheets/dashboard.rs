//! Dashboard sheet: headline metrics, ratios, and four charts pulling from
//! the statement sheets

use fincast_chart::{Chart, ChartType, DataReference, DataSeries};
use fincast_core::{
    CellRange, CfRule, ColorScalePoint, ConditionalFormatRule, Result, Workbook,
};

use crate::layout::{
    bold, title_style, year_col, FMT_PERCENT, FMT_THOUSANDS, FMT_TWO_DECIMALS, SCALE_GREEN,
    SCALE_RED, SCALE_YELLOW, YEARS,
};

pub fn populate(wb: &mut Workbook) -> Result<()> {
    let ws = wb.sheet_mut("Dashboard")?;

    ws.set_value("A1", "FINANCIAL MODEL DASHBOARD")?;
    ws.set_style("A1", &title_style())?;

    // === Key metrics ===
    ws.set_value("A3", "Key Financial Metrics")?;
    ws.set_style("A3", &bold())?;

    let metrics: [(&str, &str); 8] = [
        ("Revenue (USD)", "=Revenue_Forecast!B9"),
        ("Gross Profit (USD)", "=Income_Statement!B7"),
        ("EBITDA (USD)", "=Income_Statement!B15"),
        ("Net Income (USD)", "=Income_Statement!B20"),
        ("Cash Balance (USD)", "=Balance_Sheet!B6"),
        ("NPV (USD)", "=Capital_Budgeting!B18"),
        ("IRR", "=Capital_Budgeting!B22"),
        ("Payback Period (Years)", "=Capital_Budgeting!B26"),
    ];
    for (i, (metric, formula)) in metrics.iter().enumerate() {
        let row = i + 5;
        ws.set_value(&format!("A{row}"), *metric)?;
        ws.set_formula(&format!("B{row}"), formula)?;

        let format = if metric.contains("IRR") {
            FMT_PERCENT
        } else if metric.contains("Period") {
            FMT_TWO_DECIMALS
        } else {
            FMT_THOUSANDS
        };
        ws.amend_style(&format!("B{row}"), |s| s.number_format(format))?;
    }

    // === Ratios ===
    ws.set_value("D3", "Financial Ratios")?;
    ws.set_style("D3", &bold())?;

    let ratios: [(&str, &str); 5] = [
        ("Gross Margin", "=Income_Statement!B7/Income_Statement!B5"),
        ("EBITDA Margin", "=Income_Statement!B15/Income_Statement!B5"),
        ("Net Profit Margin", "=Income_Statement!B20/Income_Statement!B5"),
        ("ROE", "=Income_Statement!B20/Balance_Sheet!B20"),
        ("Current Ratio", "=Balance_Sheet!B8/Balance_Sheet!B15"),
    ];
    for (i, (ratio, formula)) in ratios.iter().enumerate() {
        let row = i + 5;
        ws.set_value(&format!("D{row}"), *ratio)?;
        ws.set_formula(&format!("E{row}"), formula)?;
        let format = if *ratio == "Current Ratio" {
            FMT_TWO_DECIMALS
        } else {
            FMT_PERCENT
        };
        ws.amend_style(&format!("E{row}"), |s| s.number_format(format))?;
    }

    // === Revenue chart ===
    ws.set_value("A15", "Revenue Forecast")?;
    ws.set_style("A15", &bold())?;
    for (i, year) in YEARS.iter().enumerate() {
        let col = year_col(i);
        ws.set_value(&format!("{col}15"), *year)?;
        ws.set_formula(&format!("{col}16"), &format!("=Revenue_Forecast!{col}9"))?;
        ws.amend_style(&format!("{col}16"), |s| s.number_format(FMT_THOUSANDS))?;
    }

    let mut revenue_chart = Chart::new(ChartType::Column)
        .with_title("Revenue Forecast 2025-2029")
        .with_x_axis_title("Year")
        .with_y_axis_title("Revenue");
    revenue_chart.add_series(
        DataSeries::new(DataReference::numbers("Dashboard!$B$16:$F$16"))
            .with_categories(DataReference::strings("Dashboard!$B$15:$F$15")),
    );
    ws.add_chart_at(revenue_chart, "A20")?;

    // === Income statement trends ===
    ws.set_value("A40", "Income Statement Trends")?;
    ws.set_style("A40", &bold())?;

    let trend_rows: [(&str, u32); 4] = [
        ("Revenue", 41),
        ("Gross Profit", 42),
        ("EBITDA", 43),
        ("Net Income", 44),
    ];
    for (label, row) in trend_rows {
        ws.set_value(&format!("A{row}"), label)?;
    }
    for (i, year) in YEARS.iter().enumerate() {
        let col = year_col(i);
        ws.set_value(&format!("{col}40"), *year)?;
        ws.set_formula(&format!("{col}41"), &format!("=Revenue_Forecast!{col}9"))?;
        ws.set_formula(&format!("{col}42"), &format!("=Income_Statement!{col}7"))?;
        ws.set_formula(&format!("{col}43"), &format!("=Income_Statement!{col}15"))?;
        ws.set_formula(&format!("{col}44"), &format!("=Income_Statement!{col}20"))?;
        for row in 41..=44u32 {
            ws.amend_style(&format!("{col}{row}"), |s| s.number_format(FMT_THOUSANDS))?;
        }
    }

    let mut trend_chart = Chart::new(ChartType::Line)
        .with_title("Income Statement Trends")
        .with_x_axis_title("Year")
        .with_y_axis_title("Amount");
    for (label, row) in trend_rows {
        trend_chart.add_series(
            DataSeries::new(DataReference::numbers(format!("Dashboard!$B${row}:$F${row}")))
                .with_name(label)
                .with_categories(DataReference::strings("Dashboard!$B$40:$F$40")),
        );
    }
    ws.add_chart_at(trend_chart, "G20")?;

    // === Cost structure ===
    ws.set_value("A50", "Cost Structure (Latest Year)")?;
    ws.set_style("A50", &bold())?;

    let cost_items: [(&str, &str); 5] = [
        ("COGS", "=Income_Statement!B6"),
        ("Operating Expenses", "=Income_Statement!B13"),
        ("D&A", "=Income_Statement!B12"),
        ("Interest", "=Income_Statement!B16"),
        ("Tax", "=Income_Statement!B19"),
    ];
    for (i, (item, formula)) in cost_items.iter().enumerate() {
        let row = i + 51;
        ws.set_value(&format!("A{row}"), *item)?;
        ws.set_formula(&format!("B{row}"), formula)?;
        ws.amend_style(&format!("B{row}"), |s| s.number_format(FMT_THOUSANDS))?;
    }

    let mut cost_chart = Chart::new(ChartType::Pie).with_title("Cost Structure");
    cost_chart.add_series(
        DataSeries::new(DataReference::numbers("Dashboard!$B$51:$B$55"))
            .with_categories(DataReference::strings("Dashboard!$A$51:$A$55")),
    );
    ws.add_chart_at(cost_chart, "A65")?;

    // === NPV sensitivity copy ===
    ws.set_value("G50", "NPV Sensitivity")?;
    ws.set_style("G50", &bold())?;

    for i in 0..5u32 {
        let row = i + 51;
        let source_row = i + 10;
        ws.set_formula(&format!("G{row}"), &format!("=Sensitivity_Analysis!A{source_row}"))?;
        ws.set_formula(&format!("H{row}"), &format!("=Sensitivity_Analysis!B{source_row}"))?;
        ws.amend_style(&format!("G{row}"), |s| s.number_format(FMT_PERCENT))?;
        ws.amend_style(&format!("H{row}"), |s| s.number_format(FMT_THOUSANDS))?;
    }

    let mut npv_chart = Chart::new(ChartType::Scatter)
        .with_title("NPV Sensitivity to Discount Rate")
        .with_x_axis_title("Discount Rate")
        .with_y_axis_title("NPV");
    npv_chart.add_series(
        DataSeries::new(DataReference::numbers("Dashboard!$H$51:$H$55"))
            .with_name("NPV")
            .with_categories(DataReference::numbers("Dashboard!$G$51:$G$55")),
    );
    ws.add_chart_at(npv_chart, "G65")?;

    // Green-to-red scale over the metric and ratio columns
    let metric_scale = [
        ColorScalePoint::min(SCALE_RED),
        ColorScalePoint::percentile(50.0, SCALE_YELLOW),
        ColorScalePoint::max(SCALE_GREEN),
    ];
    ws.add_conditional_format(ConditionalFormatRule::new(
        CellRange::parse("B5:B12")?,
        CfRule::ColorScale(metric_scale.clone()),
    ));
    ws.add_conditional_format(ConditionalFormatRule::new(
        CellRange::parse("E5:E9")?,
        CfRule::ColorScale(metric_scale),
    ));

    for col in [0u16, 3] {
        ws.set_column_width(col, 25.0);
    }
    for col in [1u16, 2, 4, 5, 6, 7] {
        ws.set_column_width(col, 15.0);
    }

    Ok(())
}
