//! Build-order scheduling
//!
//! The workbook is populated in a fixed declared order. [`BuildPlan`]
//! records that order as data — populate steps plus explicitly declared
//! retroactive patches — and [`BuildPlan::verify`] checks it against the
//! dependency edges the validator discovered: every formula must be written
//! after the sheet it references, unless a declared patch step rewrites it
//! later. This turns an implicit call-sequence property into a checked one.

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::validate::ValidationReport;

/// One step of the declared build order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BuildStep {
    /// Run the sheet's populator
    Populate(String),
    /// Rewrite cells of `sheet` after `after` has been populated
    ///
    /// A patch is a deliberate two-phase write: the cells exist (usually as
    /// literals) from the populate step and are overwritten with formulas
    /// once their target sheet exists.
    Patch { sheet: String, after: String },
}

/// The declared population order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BuildPlan {
    steps: Vec<BuildStep>,
}

impl BuildPlan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a populate step
    pub fn populate(mut self, sheet: &str) -> Self {
        self.steps.push(BuildStep::Populate(sheet.to_string()));
        self
    }

    /// Append a patch step: `sheet` is rewritten once `after` is populated
    pub fn patch(mut self, sheet: &str, after: &str) -> Self {
        self.steps.push(BuildStep::Patch {
            sheet: sheet.to_string(),
            after: after.to_string(),
        });
        self
    }

    /// The steps in declared order
    pub fn steps(&self) -> &[BuildStep] {
        &self.steps
    }

    /// Sheet names in populate order
    pub fn populate_order(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                BuildStep::Populate(name) => Some(name.as_str()),
                BuildStep::Patch { .. } => None,
            })
            .collect()
    }

    /// Verify the declared order against discovered dependency edges
    ///
    /// For every edge (dependent, dependency): the dependency must be
    /// populated no later than the dependent, or a patch of the dependent
    /// must be declared after the dependency's populate step. Patch steps
    /// themselves must come after both sheets they involve.
    pub fn verify(&self, report: &ValidationReport) -> Result<()> {
        let mut populate_at: AHashMap<String, usize> = AHashMap::new();
        for (i, step) in self.steps.iter().enumerate() {
            if let BuildStep::Populate(name) = step {
                populate_at.insert(name.to_ascii_lowercase(), i);
            }
        }
        let position = |name: &str| populate_at.get(&name.to_ascii_lowercase()).copied();

        // Patches must follow both involved populate steps
        for (i, step) in self.steps.iter().enumerate() {
            if let BuildStep::Patch { sheet, after } = step {
                let sheet_pos = position(sheet)
                    .ok_or_else(|| Error::UnplannedSheet(sheet.clone()))?;
                let after_pos = position(after)
                    .ok_or_else(|| Error::UnplannedSheet(after.clone()))?;
                if i < sheet_pos || i < after_pos {
                    return Err(Error::OrderViolation {
                        sheet: sheet.clone(),
                        depends_on: after.clone(),
                    });
                }
            }
        }

        for (dependent, dependency) in &report.edges {
            let from = position(dependent)
                .ok_or_else(|| Error::UnplannedSheet(dependent.clone()))?;
            let to = position(dependency)
                .ok_or_else(|| Error::UnplannedSheet(dependency.clone()))?;

            if from >= to {
                continue;
            }

            // Forward edge: legal only when a declared patch of the
            // dependent runs after the dependency is populated
            let patched = self.steps.iter().enumerate().any(|(i, step)| match step {
                BuildStep::Patch { sheet, .. } => {
                    sheet.eq_ignore_ascii_case(dependent) && i > to
                }
                BuildStep::Populate(_) => false,
            });
            if !patched {
                return Err(Error::OrderViolation {
                    sheet: dependent.clone(),
                    depends_on: dependency.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_edges(edges: &[(&str, &str)]) -> ValidationReport {
        ValidationReport {
            unresolved: Vec::new(),
            self_references: Vec::new(),
            cycles: Vec::new(),
            edges: edges
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
            formulas_checked: 0,
        }
    }

    #[test]
    fn dependency_first_order_verifies() {
        let plan = BuildPlan::new()
            .populate("Assumptions")
            .populate("Revenue_Forecast")
            .populate("Income_Statement");
        let report = report_with_edges(&[
            ("Revenue_Forecast", "Assumptions"),
            ("Income_Statement", "Revenue_Forecast"),
        ]);
        assert!(plan.verify(&report).is_ok());
    }

    #[test]
    fn forward_edge_without_patch_is_rejected() {
        let plan = BuildPlan::new()
            .populate("Balance_Sheet")
            .populate("Cash_Flow");
        let report = report_with_edges(&[("Balance_Sheet", "Cash_Flow")]);
        let err = plan.verify(&report).unwrap_err();
        assert!(matches!(
            err,
            Error::OrderViolation { ref sheet, ref depends_on }
                if sheet == "Balance_Sheet" && depends_on == "Cash_Flow"
        ));
    }

    #[test]
    fn declared_patch_legalizes_forward_edge() {
        let plan = BuildPlan::new()
            .populate("Balance_Sheet")
            .populate("Cash_Flow")
            .patch("Balance_Sheet", "Cash_Flow");
        let report = report_with_edges(&[("Balance_Sheet", "Cash_Flow")]);
        assert!(plan.verify(&report).is_ok());
    }

    #[test]
    fn patch_before_its_dependency_is_rejected() {
        let plan = BuildPlan::new()
            .populate("Balance_Sheet")
            .patch("Balance_Sheet", "Cash_Flow")
            .populate("Cash_Flow");
        let report = report_with_edges(&[]);
        assert!(matches!(
            plan.verify(&report),
            Err(Error::OrderViolation { .. })
        ));
    }

    #[test]
    fn edge_to_unplanned_sheet_is_rejected() {
        let plan = BuildPlan::new().populate("Dashboard");
        let report = report_with_edges(&[("Dashboard", "Appendix")]);
        assert!(matches!(
            plan.verify(&report),
            Err(Error::UnplannedSheet(ref name)) if name == "Appendix"
        ));
    }
}
