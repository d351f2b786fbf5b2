//! Sensitivity_Analysis sheet: one- and two-variable NPV sensitivity,
//! break-even, risk, and scenario blocks over the capital budgeting model

use fincast_chart::{Chart, ChartType, DataReference, DataSeries};
use fincast_core::{
    CellRange, CfRule, ColorScalePoint, ConditionalFormatRule, Result, Workbook,
};

use crate::layout::{
    bold, title_style, year_col, FMT_PERCENT, FMT_THOUSANDS, FMT_TWO_DECIMALS, HEADER_BLUE,
    SCALE_GREEN, SCALE_RED, SCALE_YELLOW,
};

pub fn populate(wb: &mut Workbook) -> Result<()> {
    let ws = wb.sheet_mut("Sensitivity_Analysis")?;

    ws.set_value("A1", "SENSITIVITY ANALYSIS")?;
    ws.set_style("A1", &title_style())?;

    ws.set_value("A3", "Base Case Results")?;
    ws.set_style("A3", &bold())?;

    let base_metrics: [(&str, &str, &str); 4] = [
        ("NPV", "=Capital_Budgeting!B18", FMT_THOUSANDS),
        ("IRR", "=Capital_Budgeting!B22", FMT_PERCENT),
        ("Payback Period", "=Capital_Budgeting!B26", FMT_TWO_DECIMALS),
        ("Profitability Index", "=Capital_Budgeting!B28", FMT_TWO_DECIMALS),
    ];
    for (i, (metric, formula, format)) in base_metrics.iter().enumerate() {
        let row = i + 4;
        ws.set_value(&format!("A{row}"), *metric)?;
        ws.set_formula(&format!("B{row}"), formula)?;
        ws.amend_style(&format!("B{row}"), |s| s.number_format(*format))?;
    }

    // === One-variable sensitivity: discount rate ===
    ws.set_value("A8", "Discount Rate Sensitivity")?;
    ws.set_style("A8", &bold())?;

    ws.set_value("A9", "Discount Rate")?;
    ws.set_value("B9", "NPV")?;
    ws.set_value("C9", "IRR Impact")?;
    for col in ["A", "B", "C"] {
        ws.set_style(&format!("{col}9"), &bold())?;
    }

    let discount_rates = [0.06, 0.08, 0.1, 0.12, 0.14];
    for (i, rate) in discount_rates.iter().enumerate() {
        let row = i + 10;
        ws.set_value(&format!("A{row}"), *rate)?;
        ws.amend_style(&format!("A{row}"), |s| s.number_format(FMT_PERCENT))?;

        ws.set_formula(
            &format!("B{row}"),
            &format!("=NPV(A{row},Capital_Budgeting!B11:B15)+Capital_Budgeting!B10"),
        )?;
        ws.amend_style(&format!("B{row}"), |s| s.number_format(FMT_THOUSANDS))?;

        ws.set_formula(
            &format!("C{row}"),
            "=(IRR(Capital_Budgeting!B10:B15)-Capital_Budgeting!B22)/Capital_Budgeting!B22",
        )?;
        ws.amend_style(&format!("C{row}"), |s| s.number_format(FMT_PERCENT))?;
    }

    let mut chart = Chart::new(ChartType::Scatter)
        .with_title("NPV vs Discount Rate")
        .with_x_axis_title("Discount Rate")
        .with_y_axis_title("NPV");
    chart.add_series(
        DataSeries::new(DataReference::numbers("Sensitivity_Analysis!$B$10:$B$14"))
            .with_name("NPV")
            .with_categories(DataReference::numbers("Sensitivity_Analysis!$A$10:$A$14")),
    );
    ws.add_chart_at(chart, "D8")?;

    // === Two-variable sensitivity matrix ===
    ws.set_value("A16", "Two-Variable Sensitivity Analysis (NPV)")?;
    ws.set_style("A16", &bold())?;

    ws.set_value("A17", "Annual Cash Flow % Change")?;
    ws.set_style("A17", &bold())?;

    let changes = ["-20%", "-10%", "0%", "+10%", "+20%"];
    let multipliers = ["0.8", "0.9", "1", "1.1", "1.2"];
    for (j, change) in changes.iter().enumerate() {
        let addr = format!("{}17", year_col(j));
        ws.set_value(&addr, *change)?;
        ws.set_style(&addr, &bold())?;
    }

    ws.set_value("A18", "Initial Investment % Change")?;
    ws.set_style("A18", &bold())?;

    for (i, inv_change) in changes.iter().enumerate() {
        let row = i + 19;
        ws.set_value(&format!("A{row}"), *inv_change)?;
        let inv_multiplier = multipliers[i];

        for (j, cf_multiplier) in multipliers.iter().enumerate() {
            let col = year_col(j);
            ws.set_formula(
                &format!("{col}{row}"),
                &format!(
                    "=NPV(Capital_Budgeting!B6,Capital_Budgeting!B11:B15*{cf_multiplier})+(Capital_Budgeting!B10*{inv_multiplier})"
                ),
            )?;
            ws.amend_style(&format!("{col}{row}"), |s| s.number_format(FMT_THOUSANDS))?;
        }
    }

    ws.add_conditional_format(ConditionalFormatRule::new(
        CellRange::parse("B19:F23")?,
        CfRule::ColorScale([
            ColorScalePoint::min(SCALE_RED),
            ColorScalePoint::percentile(50.0, SCALE_YELLOW),
            ColorScalePoint::max(SCALE_GREEN),
        ]),
    ));

    // === Break-even ===
    ws.set_value("A25", "Break-even Analysis")?;
    ws.set_style("A25", &bold())?;

    let breakeven: [(&str, &str, &str); 3] = [
        (
            "Break-even Annual Cash Flow",
            "=PMT(Capital_Budgeting!B6,Capital_Budgeting!B5,-Capital_Budgeting!B4,Capital_Budgeting!B7)",
            FMT_THOUSANDS,
        ),
        (
            "% of Base Case Cash Flow",
            "=B26/AVERAGE(Capital_Budgeting!B11:B15)",
            FMT_PERCENT,
        ),
        (
            "Required Growth Rate",
            "=(B26/Capital_Budgeting!B11)^(1/Capital_Budgeting!B5)-1",
            FMT_PERCENT,
        ),
    ];
    for (i, (metric, formula, format)) in breakeven.iter().enumerate() {
        let row = i + 26;
        ws.set_value(&format!("A{row}"), *metric)?;
        ws.set_formula(&format!("B{row}"), formula)?;
        ws.amend_style(&format!("B{row}"), |s| s.number_format(*format))?;
    }

    // === Risk metrics over the matrix ===
    ws.set_value("A30", "Risk Analysis")?;
    ws.set_style("A30", &bold())?;

    let risk_metrics: [(&str, &str, &str); 4] = [
        ("NPV Standard Deviation", "=STDEV(B19:F23)", FMT_THOUSANDS),
        (
            "Coefficient of Variation",
            "=ABS(B31/AVERAGE(B19:F23))",
            FMT_TWO_DECIMALS,
        ),
        ("NPV Range", "=MAX(B19:F23)-MIN(B19:F23)", FMT_THOUSANDS),
        (
            "Probability of Negative NPV",
            "=COUNTIF(B19:F23,\"<0\")/25",
            FMT_PERCENT,
        ),
    ];
    for (i, (metric, formula, format)) in risk_metrics.iter().enumerate() {
        let row = i + 31;
        ws.set_value(&format!("A{row}"), *metric)?;
        ws.set_formula(&format!("B{row}"), formula)?;
        ws.amend_style(&format!("B{row}"), |s| s.number_format(*format))?;
    }

    // === Scenario block ===
    ws.set_value("A36", "Scenario Analysis")?;
    ws.set_style("A36", &bold())?;

    let scenarios: [(&str, &str); 5] = [
        ("Best Case", "=MAX(B19:F23)"),
        ("Base Case", "=INDEX(B19:F23,3,3)"),
        ("Worst Case", "=MIN(B19:F23)"),
        ("Expected Value", "=AVERAGE(B19:F23)"),
        ("Range of Outcomes", "=MAX(B19:F23)-MIN(B19:F23)"),
    ];
    for (i, (scenario, formula)) in scenarios.iter().enumerate() {
        let row = i + 37;
        ws.set_value(&format!("A{row}"), *scenario)?;
        ws.set_formula(&format!("B{row}"), formula)?;
        ws.amend_style(&format!("B{row}"), |s| s.number_format(FMT_THOUSANDS))?;
    }

    for row in [3u32, 8, 16, 25, 30, 36] {
        ws.amend_style(&format!("A{row}"), |s| s.fill(HEADER_BLUE))?;
    }

    ws.set_column_width(0, 35.0);
    for col in 1..=5u16 {
        ws.set_column_width(col, 15.0);
    }

    Ok(())
}
