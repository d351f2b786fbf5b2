//! Integration tests over the fully built model

use fincast_core::CellValue;
use fincast_formula::{validate, Error};
use fincast_model::{build, build_validated, build_plan, TAB_ORDER};
use pretty_assertions::assert_eq;

#[test]
fn builds_and_validates_clean() {
    let (wb, report) = build_validated().expect("model builds and validates");
    assert_eq!(wb.sheet_count(), 14);
    assert!(report.passed());
    assert!(report.formulas_checked > 300);
}

#[test]
fn tab_order_is_the_declared_contract() {
    let (wb, _) = build_validated().unwrap();
    assert_eq!(wb.sheet_names(), TAB_ORDER);
}

#[test]
fn revenue_total_is_a_sum_formula() {
    let wb = build().unwrap();
    let sheet = wb.sheet("Revenue_Forecast").unwrap();
    assert_eq!(sheet.formula("B9").unwrap(), Some("=SUM(B5:B7)"));
    assert_eq!(sheet.formula("F9").unwrap(), Some("=SUM(F5:F7)"));
    assert_eq!(
        sheet.value("B5").unwrap(),
        CellValue::Number(1_000_000.0)
    );
    assert_eq!(
        sheet.formula("C5").unwrap(),
        Some("=B5*(1+Assumptions!B11)")
    );
}

#[test]
fn income_statement_links_revenue_across_all_year_columns() {
    let wb = build().unwrap();
    let sheet = wb.sheet("Income_Statement").unwrap();
    for col in ["B", "C", "D", "E", "F"] {
        assert_eq!(
            sheet.formula(&format!("{col}5")).unwrap(),
            Some(format!("=Revenue_Forecast!{col}9").as_str())
        );
    }
}

#[test]
fn balance_sheet_cash_is_patched_after_cash_flow() {
    let wb = build().unwrap();
    let sheet = wb.sheet("Balance_Sheet").unwrap();

    // Base year stays a literal; later years are rewritten by the patch
    assert_eq!(sheet.value("B6").unwrap(), CellValue::Number(500_000.0));
    for col in ["C", "D", "E", "F"] {
        assert_eq!(
            sheet.formula(&format!("{col}6")).unwrap(),
            Some(format!("=Cash_Flow!{col}22").as_str())
        );
    }
}

#[test]
fn construction_is_deterministic() {
    let first = build().unwrap();
    let second = build().unwrap();

    for (a, b) in first.sheets().zip(second.sheets()) {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.cell_count(), b.cell_count(), "sheet {}", a.name());
        for (row, col, cell) in a.iter_cells() {
            let other = b.cell_at(row, col).expect("cell present in both builds");
            assert_eq!(cell.value, other.value, "{}!{row},{col}", a.name());
        }
    }
}

#[test]
fn declared_order_is_a_topological_order_of_discovered_edges() {
    let wb = build().unwrap();
    let report = validate(&wb).unwrap();
    assert!(report.passed());
    build_plan().verify(&report).expect("declared order verifies");

    // The pipeline's backbone edges are all discovered
    for edge in [
        ("Revenue_Forecast", "Assumptions"),
        ("COGS_Budget", "Revenue_Forecast"),
        ("Income_Statement", "Revenue_Forecast"),
        ("Cash_Flow", "Income_Statement"),
        ("Balance_Sheet", "Cash_Flow"),
        ("Stock_Valuation", "Balance_Sheet"),
        ("Sensitivity_Analysis", "Capital_Budgeting"),
        ("Dashboard", "Sensitivity_Analysis"),
    ] {
        assert!(
            report
                .edges
                .iter()
                .any(|(a, b)| (a.as_str(), b.as_str()) == edge),
            "missing edge {edge:?}"
        );
    }
}

#[test]
fn injected_cycle_is_rejected_naming_both_sheets() {
    let mut wb = build().unwrap();
    wb.sheet_mut("Assumptions")
        .unwrap()
        .set_formula("B1", "=Dashboard!B5")
        .unwrap();

    let report = validate(&wb).unwrap();
    assert!(!report.cycles.is_empty());
    match report.ensure().unwrap_err() {
        Error::Cycle { path } => {
            assert!(path.contains(&"Assumptions".to_string()));
            assert!(path.contains(&"Dashboard".to_string()));
        }
        other => panic!("expected cycle error, got {other}"),
    }
}

#[test]
fn reference_to_uncreated_sheet_is_rejected() {
    let mut wb = build().unwrap();
    wb.sheet_mut("Dashboard")
        .unwrap()
        .set_formula("A2", "=Appendix!B2")
        .unwrap();

    let report = validate(&wb).unwrap();
    assert!(matches!(
        report.ensure(),
        Err(Error::UnknownSheet { ref sheet, .. }) if sheet == "Appendix"
    ));
}

#[test]
fn sensitivity_base_metrics_point_at_real_capital_budgeting_rows() {
    let wb = build().unwrap();
    let capital = wb.sheet("Capital_Budgeting").unwrap();
    let sensitivity = wb.sheet("Sensitivity_Analysis").unwrap();

    for (metric_cell, target) in [("B4", "B18"), ("B5", "B22"), ("B6", "B26"), ("B7", "B28")] {
        let formula = sensitivity.formula(metric_cell).unwrap().unwrap();
        assert_eq!(formula, format!("=Capital_Budgeting!{target}"));
        // The referenced cell actually holds content
        assert!(
            capital.cell(target).unwrap().is_some(),
            "Capital_Budgeting!{target} is empty"
        );
    }
}

#[test]
fn dashboard_metrics_resolve_to_populated_cells() {
    let wb = build().unwrap();
    let dashboard = wb.sheet("Dashboard").unwrap();

    for row in 5..=12u32 {
        let formula = dashboard.formula(&format!("B{row}")).unwrap().unwrap();
        let refs = fincast_formula::extract_refs(formula).unwrap();
        for formula_ref in refs {
            let target_sheet = formula_ref.sheet.expect("dashboard metrics are cross-sheet");
            let target = wb.sheet(&target_sheet).unwrap();
            for addr in formula_ref.range.cells() {
                assert!(
                    target.cell_at(addr.row, addr.col).is_some(),
                    "{target_sheet}!{addr} referenced by Dashboard!B{row} is empty"
                );
            }
        }
    }
}

#[test]
fn charts_are_attached_where_the_model_puts_them() {
    let wb = build().unwrap();
    assert_eq!(wb.sheet("Dashboard").unwrap().charts().len(), 4);
    assert_eq!(wb.sheet("Income_Statement").unwrap().charts().len(), 1);
    assert_eq!(wb.sheet("Capital_Budgeting").unwrap().charts().len(), 1);
    assert_eq!(wb.sheet("Sensitivity_Analysis").unwrap().charts().len(), 1);
    assert!(wb.sheet("Assumptions").unwrap().charts().is_empty());
}

#[test]
fn no_formula_cell_also_claims_a_literal() {
    let wb = build().unwrap();
    for sheet in wb.sheets() {
        for (_, _, cell) in sheet.iter_cells() {
            if let CellValue::Formula(text) = &cell.value {
                assert!(text.starts_with('='), "formula missing '=': {text}");
            }
        }
    }
}
