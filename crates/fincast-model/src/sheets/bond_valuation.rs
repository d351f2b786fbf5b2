//! Bond_Valuation sheet: semi-annual coupon bond pricing and approximate YTM
//!
//! The only sheet with no cross-sheet references.

use fincast_core::{CellRange, DataValidation, Result, Workbook};

use crate::layout::{bold, title_style, FMT_DOLLARS, FMT_PERCENT, FMT_PRICE};

pub fn populate(wb: &mut Workbook) -> Result<()> {
    let ws = wb.sheet_mut("Bond_Valuation")?;

    ws.set_value("A1", "BOND VALUATION MODEL")?;
    ws.set_style("A1", &title_style())?;

    ws.set_value("A3", "Bond Parameters")?;
    ws.set_style("A3", &bold())?;

    let params: [(&str, f64); 5] = [
        ("Par Value", 1000.0),
        ("Coupon Rate", 0.05),
        ("Years to Maturity", 10.0),
        ("Payments per Year", 2.0),
        ("Required Yield", 0.06),
    ];

    let mut positive = DataValidation::decimal_greater_than("0")
        .with_error("Invalid Input", "Value must be greater than 0");
    let mut rate = DataValidation::decimal_between("0", "1")
        .with_error("Invalid Rate", "Rate must be between 0 and 1");

    for (i, (param, value)) in params.iter().enumerate() {
        let row = i + 4;
        let cell = format!("B{row}");
        ws.set_value(&format!("A{row}"), *param)?;
        ws.set_value(&cell, *value)?;

        if param.contains("Rate") || param.contains("Yield") {
            ws.amend_style(&cell, |s| s.number_format(FMT_PERCENT))?;
            rate.add_range(CellRange::parse(&cell)?);
        } else if param.contains("Value") {
            ws.amend_style(&cell, |s| s.number_format(FMT_DOLLARS))?;
            positive.add_range(CellRange::parse(&cell)?);
        } else {
            positive.add_range(CellRange::parse(&cell)?);
        }
    }

    ws.set_value("A10", "Total Periods")?;
    ws.set_formula("B10", "=B6*B7")?;

    ws.set_value("A11", "Periodic Coupon Payment")?;
    ws.set_formula("B11", "=B4*B5/B7")?;
    ws.amend_style("B11", |s| s.number_format(FMT_PRICE))?;

    ws.set_value("A12", "Periodic Yield Rate")?;
    ws.set_formula("B12", "=B8/B7")?;
    ws.amend_style("B12", |s| s.number_format(FMT_PERCENT))?;

    // === Cash flow table: 20 semi-annual periods ===
    ws.set_value("A14", "Period")?;
    ws.set_value("B14", "Cash Flow")?;
    ws.set_value("C14", "Present Value")?;
    for col in ["A", "B", "C"] {
        ws.set_style(&format!("{col}14"), &bold())?;
    }

    for period in 1..=20u32 {
        let row = period + 14;
        ws.set_value(&format!("A{row}"), f64::from(period))?;

        if period == 20 {
            // Final period returns the par value with the last coupon
            ws.set_formula(&format!("B{row}"), "=B11+B4")?;
        } else {
            ws.set_formula(&format!("B{row}"), "=B11")?;
        }
        ws.set_formula(&format!("C{row}"), &format!("=B{row}/(1+B12)^A{row}"))?;

        ws.amend_style(&format!("B{row}"), |s| s.number_format(FMT_PRICE))?;
        ws.amend_style(&format!("C{row}"), |s| s.number_format(FMT_PRICE))?;
    }

    ws.set_value("A35", "Bond Value")?;
    ws.set_style("A35", &bold())?;
    ws.set_formula("B35", "=SUM(C15:C34)")?;
    ws.amend_style("B35", |s| s.bold(true).number_format(FMT_PRICE))?;

    ws.set_value("A37", "Bond YTM Calculation")?;
    ws.set_style("A37", &bold())?;

    ws.set_value("A38", "Current Bond Price")?;
    ws.set_value("B38", 950.0)?;
    ws.amend_style("B38", |s| s.number_format(FMT_PRICE))?;
    positive.add_range(CellRange::parse("B38")?);

    ws.set_value("A39", "Approximate YTM")?;
    ws.set_formula("B39", "=((B11*B7)+((B4-B38)/B6))/((B4+B38)/2)")?;
    ws.amend_style("B39", |s| s.number_format(FMT_PERCENT))?;

    ws.set_value("A41", "Validation Checks")?;
    ws.set_style("A41", &bold())?;

    ws.set_value("A42", "Price/Par Value Ratio")?;
    ws.set_formula("B42", "=B35/B4")?;
    ws.amend_style("B42", |s| s.number_format(FMT_PERCENT))?;

    ws.set_value("A43", "Status")?;
    ws.set_formula("B43", "=IF(AND(B35>0,B39>0),\"Valid\",\"Check Inputs\")")?;

    ws.add_data_validation(positive);
    ws.add_data_validation(rate);

    ws.set_column_width(0, 25.0);
    ws.set_column_width(1, 15.0);
    ws.set_column_width(2, 15.0);

    Ok(())
}
