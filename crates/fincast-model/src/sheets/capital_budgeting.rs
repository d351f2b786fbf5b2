//! Capital_Budgeting sheet: project cash flows, NPV, IRR, payback, and
//! profitability index

use fincast_chart::{Chart, ChartType, DataReference, DataSeries};
use fincast_core::{CellRange, CellValue, DataValidation, Result, Workbook};

use crate::layout::{bold, title_style, FMT_PERCENT, FMT_THOUSANDS, FMT_TWO_DECIMALS};

pub fn populate(wb: &mut Workbook) -> Result<()> {
    let ws = wb.sheet_mut("Capital_Budgeting")?;

    ws.set_value("A1", "CAPITAL BUDGETING MODEL")?;
    ws.set_style("A1", &title_style())?;

    ws.set_value("A3", "Project Parameters")?;
    ws.set_style("A3", &bold())?;

    let mut positive = DataValidation::decimal_greater_than("0")
        .with_error("Invalid Input", "Value must be greater than 0");
    let mut rate = DataValidation::decimal_between("0", "1")
        .with_error("Invalid Rate", "Rate must be between 0 and 1");

    let params: [(&str, CellValue); 4] = [
        ("Initial Investment", CellValue::Number(500_000.0)),
        ("Project Life (Years)", CellValue::Number(5.0)),
        ("Discount Rate", CellValue::formula("=Assumptions!B22")),
        ("Salvage Value", CellValue::Number(50_000.0)),
    ];
    for (i, (param, value)) in params.iter().enumerate() {
        let row = i + 4;
        let cell = format!("B{row}");
        ws.set_value(&format!("A{row}"), *param)?;
        ws.set_value(&cell, value.clone())?;

        if *param == "Discount Rate" {
            ws.amend_style(&cell, |s| s.number_format(FMT_PERCENT))?;
            rate.add_range(CellRange::parse(&cell)?);
        } else if param.contains("Value") || param.contains("Investment") {
            ws.amend_style(&cell, |s| s.number_format(FMT_THOUSANDS))?;
            positive.add_range(CellRange::parse(&cell)?);
        } else {
            positive.add_range(CellRange::parse(&cell)?);
        }
    }

    // === Project cash flow table, years 0..5 ===
    let headers = [
        ("A9", "Year"),
        ("B9", "Cash Flow"),
        ("C9", "Discounted Cash Flow"),
        ("D9", "Cumulative Cash Flow"),
        ("E9", "Cumulative Discounted Cash Flow"),
    ];
    for (cell, header) in headers {
        ws.set_value(cell, header)?;
        ws.set_style(cell, &bold())?;
    }

    let cash_flows: [(u32, CellValue); 6] = [
        (0, CellValue::formula("=-B4")),
        (1, CellValue::Number(120_000.0)),
        (2, CellValue::Number(150_000.0)),
        (3, CellValue::Number(180_000.0)),
        (4, CellValue::Number(200_000.0)),
        // Final year adds the salvage value
        (5, CellValue::formula("=220000+B7")),
    ];
    for (i, (year, cash_flow)) in cash_flows.iter().enumerate() {
        let row = i as u32 + 10;
        ws.set_value(&format!("A{row}"), f64::from(*year))?;
        ws.set_value(&format!("B{row}"), cash_flow.clone())?;

        let discounted = match cash_flow {
            CellValue::Formula(text) => {
                // Inline the cash flow expression, parenthesized so the
                // discounting divides the whole amount
                let expr = text.trim_start_matches('=');
                if expr.starts_with('-') {
                    format!("={expr}/(1+$B$6)^A{row}")
                } else {
                    format!("=({expr})/(1+$B$6)^A{row}")
                }
            }
            _ => format!("=B{row}/(1+$B$6)^A{row}"),
        };
        ws.set_formula(&format!("C{row}"), &discounted)?;

        if *year == 0 {
            ws.set_formula(&format!("D{row}"), &format!("=B{row}"))?;
            ws.set_formula(&format!("E{row}"), &format!("=C{row}"))?;
        } else {
            ws.set_formula(&format!("D{row}"), &format!("=D{}+B{row}", row - 1))?;
            ws.set_formula(&format!("E{row}"), &format!("=E{}+C{row}", row - 1))?;
        }

        for col in ["B", "C", "D", "E"] {
            ws.amend_style(&format!("{col}{row}"), |s| s.number_format(FMT_THOUSANDS))?;
        }
    }

    ws.set_value("A17", "NPV Calculation")?;
    ws.set_style("A17", &bold())?;

    ws.set_value("A18", "Present Value of Cash Flows")?;
    ws.set_formula("B18", "=E15")?;
    ws.amend_style("B18", |s| s.number_format(FMT_THOUSANDS))?;

    ws.set_value("A19", "NPV Decision")?;
    ws.set_formula("B19", "=IF(B18>0,\"Accept Project\",\"Reject Project\")")?;
    ws.set_style("B19", &bold())?;

    ws.set_value("A21", "IRR Calculation")?;
    ws.set_style("A21", &bold())?;

    ws.set_value("A22", "Internal Rate of Return (IRR)")?;
    ws.set_formula("B22", "=IRR(B10:B15)")?;
    ws.amend_style("B22", |s| s.number_format(FMT_PERCENT))?;

    ws.set_value("A23", "IRR Decision")?;
    ws.set_formula("B23", "=IF(B22>B6,\"Accept Project\",\"Reject Project\")")?;
    ws.set_style("B23", &bold())?;

    ws.set_value("A25", "Payback Period Calculation")?;
    ws.set_style("A25", &bold())?;

    ws.set_value("A26", "Payback Period (Years)")?;
    ws.set_formula(
        "B26",
        "=MATCH(0,D10:D15,1)-1+ABS(INDEX(D10:D15,MATCH(0,D10:D15,1)-1))/INDEX(B10:B15,MATCH(0,D10:D15,1))",
    )?;
    ws.amend_style("B26", |s| s.number_format(FMT_TWO_DECIMALS))?;

    ws.set_value("A27", "Discounted Payback Period (Years)")?;
    ws.set_formula(
        "B27",
        "=MATCH(0,E10:E15,1)-1+ABS(INDEX(E10:E15,MATCH(0,E10:E15,1)-1))/INDEX(C10:C15,MATCH(0,E10:E15,1))",
    )?;
    ws.amend_style("B27", |s| s.number_format(FMT_TWO_DECIMALS))?;

    ws.set_value("A28", "Profitability Index")?;
    ws.set_formula("B28", "=1+B18/B4")?;
    ws.amend_style("B28", |s| s.number_format(FMT_TWO_DECIMALS))?;

    ws.add_data_validation(positive);
    ws.add_data_validation(rate);

    let mut chart = Chart::new(ChartType::Line)
        .with_title("Cumulative Cash Flows")
        .with_x_axis_title("Year")
        .with_y_axis_title("Cash Flow");
    chart.add_series(
        DataSeries::new(DataReference::numbers("Capital_Budgeting!$D$10:$D$15"))
            .with_name("Cumulative Cash Flow")
            .with_categories(DataReference::numbers("Capital_Budgeting!$A$10:$A$15")),
    );
    chart.add_series(
        DataSeries::new(DataReference::numbers("Capital_Budgeting!$E$10:$E$15"))
            .with_name("Cumulative Discounted Cash Flow")
            .with_categories(DataReference::numbers("Capital_Budgeting!$A$10:$A$15")),
    );
    ws.add_chart_at(chart, "A30")?;

    for col in 0..=4u16 {
        ws.set_column_width(col, 20.0);
    }

    Ok(())
}
