//! Contributions sheet: team member credit table

use fincast_core::{BorderLineStyle, Result, Workbook};

use crate::layout::{bold, title_style, FMT_WHOLE_PERCENT, LIGHT_BLUE, LIGHT_GRAY, LIGHT_GREEN};

pub fn populate(wb: &mut Workbook) -> Result<()> {
    let ws = wb.sheet_mut("Contributions")?;

    ws.set_value("A1", "TEAM MEMBER CONTRIBUTIONS")?;
    ws.set_style("A1", &title_style())?;

    let headers = [
        ("A3", "Team Member Name"),
        ("B3", "Student ID"),
        ("C3", "Contribution Description"),
        ("D3", "Contribution %"),
    ];
    for (cell, header) in headers {
        ws.set_value(cell, header)?;
        ws.set_style(cell, &bold())?;
    }

    let team_members: [(&str, &str, &str, u32); 10] = [
        ("Team Member 1", "ID12345", "Dashboard, Business Overview, Assumptions", 10),
        ("Team Member 2", "ID23456", "Revenue Forecast, COGS Budget", 10),
        ("Team Member 3", "ID34567", "OPEX Budget, Income Statement", 10),
        ("Team Member 4", "ID45678", "Balance Sheet, Cash Flow", 10),
        ("Team Member 5", "ID56789", "Stock Valuation", 10),
        ("Team Member 6", "ID67890", "Bond Valuation", 10),
        ("Team Member 7", "ID78901", "Capital Budgeting", 10),
        ("Team Member 8", "ID89012", "Sensitivity Analysis", 10),
        ("Team Member 9", "ID90123", "Presentations, Documentation", 10),
        ("Team Member 10", "ID01234", "Quality Control, Integration", 10),
    ];
    for (i, (name, id, description, contribution)) in team_members.iter().enumerate() {
        let row = i + 4;
        ws.set_value(&format!("A{row}"), *name)?;
        ws.set_value(&format!("B{row}"), *id)?;
        ws.set_value(&format!("C{row}"), *description)?;
        ws.set_value(&format!("D{row}"), f64::from(*contribution) / 100.0)?;
        ws.amend_style(&format!("D{row}"), |s| s.number_format(FMT_WHOLE_PERCENT))?;
    }

    ws.set_value("A15", "Total")?;
    ws.set_style("A15", &bold())?;
    ws.set_formula("D15", "=SUM(D4:D13)")?;
    ws.amend_style("D15", |s| s.bold(true).number_format(FMT_WHOLE_PERCENT))?;

    ws.set_column_width(0, 20.0);
    ws.set_column_width(1, 15.0);
    ws.set_column_width(2, 40.0);
    ws.set_column_width(3, 15.0);

    ws.amend_range_style("A3:D3", |s| s.fill(LIGHT_BLUE))?;
    ws.amend_style("A15", |s| s.fill(LIGHT_GREEN))?;
    ws.amend_style("D15", |s| s.fill(LIGHT_GREEN))?;

    // Alternating row shading for readability
    for row in (4..=13u32).step_by(2) {
        ws.amend_range_style(&format!("A{row}:D{row}"), |s| s.fill(LIGHT_GRAY))?;
    }

    ws.amend_range_style("A3:D15", |s| s.border(BorderLineStyle::Thin))?;

    Ok(())
}
