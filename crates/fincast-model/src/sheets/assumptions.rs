//! Assumptions sheet: the model's input constants

use fincast_core::{Result, Workbook};

use crate::layout::{bold, title_style, FMT_PERCENT, LIGHT_YELLOW};

pub fn populate(wb: &mut Workbook) -> Result<()> {
    let ws = wb.sheet_mut("Assumptions")?;

    ws.set_value("A1", "MODEL ASSUMPTIONS")?;
    ws.set_style("A1", &title_style())?;

    ws.set_value("A3", "General Assumptions")?;
    ws.set_style("A3", &bold())?;

    let general: [(&str, f64); 4] = [
        ("Base Year", 2025.0),
        ("Forecast Period (Years)", 5.0),
        ("Tax Rate", 0.24),
        ("Inflation Rate", 0.03),
    ];
    for (i, (label, value)) in general.iter().enumerate() {
        let row = i + 4;
        ws.set_value(&format!("A{row}"), *label)?;
        ws.set_value(&format!("B{row}"), *value)?;
        if label.contains("Rate") && *value < 1.0 {
            ws.amend_style(&format!("B{row}"), |s| s.number_format(FMT_PERCENT))?;
        }
    }

    ws.set_value("A10", "Revenue Growth Assumptions")?;
    ws.set_style("A10", &bold())?;

    let growth: [(&str, f64); 3] = [
        ("Product Line 1 Growth", 0.05),
        ("Product Line 2 Growth", 0.07),
        ("Product Line 3 Growth", 0.04),
    ];
    for (i, (label, value)) in growth.iter().enumerate() {
        let row = i + 11;
        ws.set_value(&format!("A{row}"), *label)?;
        ws.set_value(&format!("B{row}"), *value)?;
        ws.amend_style(&format!("B{row}"), |s| s.number_format(FMT_PERCENT))?;
    }

    ws.set_value("A16", "Cost Assumptions")?;
    ws.set_style("A16", &bold())?;

    let costs: [(&str, f64); 3] = [
        ("COGS as % of Revenue", 0.6),
        ("SG&A as % of Revenue", 0.15),
        ("R&D as % of Revenue", 0.08),
    ];
    for (i, (label, value)) in costs.iter().enumerate() {
        let row = i + 17;
        ws.set_value(&format!("A{row}"), *label)?;
        ws.set_value(&format!("B{row}"), *value)?;
        ws.amend_style(&format!("B{row}"), |s| s.number_format(FMT_PERCENT))?;
    }

    ws.set_value("A22", "Discount Rate (WACC)")?;
    ws.set_value("B22", 0.1)?;
    ws.amend_style("B22", |s| s.number_format(FMT_PERCENT))?;

    ws.set_column_width(0, 25.0);
    ws.set_column_width(1, 15.0);

    for row in [3u32, 10, 16] {
        ws.amend_style(&format!("A{row}"), |s| s.fill(LIGHT_YELLOW))?;
    }

    Ok(())
}
