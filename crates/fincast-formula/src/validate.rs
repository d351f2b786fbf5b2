//! Formula reference validation
//!
//! Walks every formula cell of a populated workbook and checks that each
//! extracted reference resolves: the target sheet exists, no cell's
//! reference range contains the cell itself, and the sheet-level dependency
//! graph is acyclic. All of this runs before the output file is written; a
//! failed report aborts the build.

use fincast_core::Workbook;

use crate::error::{Error, Result};
use crate::extract::extract_refs;
use crate::graph::SheetGraph;

/// A reference whose target sheet does not exist in the workbook
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnresolvedReference {
    /// The formula cell, as "Sheet!A1"
    pub cell: String,
    /// The sheet name the formula references
    pub target_sheet: String,
    /// The referenced address or range
    pub reference: String,
}

/// A formula whose reference range contains its own cell
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelfReference {
    /// The formula cell, as "Sheet!A1"
    pub cell: String,
    /// The offending address or range
    pub reference: String,
}

/// Outcome of a validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationReport {
    /// References to sheets that were never created
    pub unresolved: Vec<UnresolvedReference>,
    /// Accidental self-referential formulas
    pub self_references: Vec<SelfReference>,
    /// Sheet-level dependency cycles, each closed (first == last)
    pub cycles: Vec<Vec<String>>,
    /// Discovered (dependent, dependency) sheet pairs
    pub edges: Vec<(String, String)>,
    /// Number of formula cells examined
    pub formulas_checked: usize,
}

impl ValidationReport {
    /// Whether the workbook passed every check
    pub fn passed(&self) -> bool {
        self.unresolved.is_empty() && self.self_references.is_empty() && self.cycles.is_empty()
    }

    /// Convert the first recorded failure into its typed error
    pub fn ensure(&self) -> Result<()> {
        if let Some(bad) = self.unresolved.first() {
            return Err(Error::UnknownSheet {
                sheet: bad.target_sheet.clone(),
                cell: bad.cell.clone(),
            });
        }
        if let Some(bad) = self.self_references.first() {
            return Err(Error::SelfReference {
                cell: bad.cell.clone(),
                reference: bad.reference.clone(),
            });
        }
        if let Some(cycle) = self.cycles.first() {
            return Err(Error::Cycle {
                path: cycle.clone(),
            });
        }
        Ok(())
    }
}

/// Validate every formula reference in a populated workbook
///
/// Returns a report; only a malformed reference token errors out directly.
pub fn validate(workbook: &Workbook) -> Result<ValidationReport> {
    let mut graph = SheetGraph::new(workbook.sheet_names());
    let mut unresolved = Vec::new();
    let mut self_references = Vec::new();
    let mut formulas_checked = 0usize;

    for sheet in workbook.sheets() {
        for (addr, text) in sheet.formula_cells() {
            formulas_checked += 1;
            let cell_label = || format!("{}!{}", sheet.name(), addr);
            let refs = extract_refs(text)
                .map_err(|e| Error::Parse(format!("{}: {e}", cell_label())))?;

            for formula_ref in refs {
                match &formula_ref.sheet {
                    Some(target) if !target.eq_ignore_ascii_case(sheet.name()) => {
                        if workbook.contains_sheet(target) {
                            graph.add_edge(sheet.name(), target);
                        } else {
                            unresolved.push(UnresolvedReference {
                                cell: cell_label(),
                                target_sheet: target.clone(),
                                reference: formula_ref.range.to_string(),
                            });
                        }
                    }
                    _ => {
                        // Reference into the formula's own sheet: the one
                        // illegal shape is covering the cell itself
                        if formula_ref.range.contains(&addr) {
                            self_references.push(SelfReference {
                                cell: cell_label(),
                                reference: formula_ref.range.to_string(),
                            });
                        }
                    }
                }
            }
        }
    }

    Ok(ValidationReport {
        unresolved,
        self_references,
        cycles: graph.find_cycles(),
        edges: graph.edges(),
        formulas_checked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincast_core::Workbook;

    fn workbook(sheets: &[&str]) -> Workbook {
        let mut wb = Workbook::new();
        for name in sheets {
            wb.add_sheet(name).unwrap();
        }
        wb
    }

    #[test]
    fn clean_workbook_passes() {
        let mut wb = workbook(&["Assumptions", "Revenue_Forecast"]);
        let sheet = wb.sheet_mut("Revenue_Forecast").unwrap();
        sheet.set_value("B5", 1_000_000.0).unwrap();
        sheet.set_formula("C5", "=B5*(1+Assumptions!B11)").unwrap();

        let report = validate(&wb).unwrap();
        assert!(report.passed());
        assert_eq!(report.formulas_checked, 1);
        assert_eq!(
            report.edges,
            [("Revenue_Forecast".to_string(), "Assumptions".to_string())]
        );
    }

    #[test]
    fn dangling_sheet_reference_is_reported() {
        let mut wb = workbook(&["Dashboard"]);
        wb.sheet_mut("Dashboard")
            .unwrap()
            .set_formula("B5", "=Appendix!B2")
            .unwrap();

        let report = validate(&wb).unwrap();
        assert!(!report.passed());
        assert_eq!(report.unresolved.len(), 1);
        assert_eq!(report.unresolved[0].target_sheet, "Appendix");
        assert!(matches!(
            report.ensure(),
            Err(Error::UnknownSheet { ref sheet, .. }) if sheet == "Appendix"
        ));
    }

    #[test]
    fn self_referential_cell_is_reported() {
        let mut wb = workbook(&["Assumptions"]);
        wb.sheet_mut("Assumptions")
            .unwrap()
            .set_formula("B9", "=SUM(B5:B9)")
            .unwrap();

        let report = validate(&wb).unwrap();
        assert_eq!(report.self_references.len(), 1);
        assert!(matches!(
            report.ensure(),
            Err(Error::SelfReference { ref cell, .. }) if cell == "Assumptions!B9"
        ));
    }

    #[test]
    fn sheet_cycle_is_reported() {
        let mut wb = workbook(&["Assumptions", "Dashboard"]);
        wb.sheet_mut("Dashboard")
            .unwrap()
            .set_formula("B5", "=Assumptions!B1")
            .unwrap();
        wb.sheet_mut("Assumptions")
            .unwrap()
            .set_formula("B1", "=Dashboard!B5")
            .unwrap();

        let report = validate(&wb).unwrap();
        assert_eq!(report.cycles.len(), 1);
        let err = report.ensure().unwrap_err();
        match err {
            Error::Cycle { path } => {
                assert!(path.contains(&"Assumptions".to_string()));
                assert!(path.contains(&"Dashboard".to_string()));
            }
            other => panic!("expected cycle error, got {other}"),
        }
    }

    #[test]
    fn parse_failure_names_the_cell() {
        let mut wb = workbook(&["Dashboard"]);
        wb.sheet_mut("Dashboard")
            .unwrap()
            .set_formula("B5", "=Appendix!notacell")
            .unwrap();

        let err = validate(&wb).unwrap_err();
        assert!(err.to_string().contains("Dashboard!B5"));
    }
}
