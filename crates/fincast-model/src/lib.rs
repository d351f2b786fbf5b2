//! # fincast-model
//!
//! The financial model itself: fourteen worksheet populators, the declared
//! build plan, and the validation wiring. [`build_validated`] is the one
//! entry point callers need — it populates the workbook, validates every
//! cross-sheet reference, and verifies the declared population order
//! before anything touches disk.

use fincast_core::Workbook;
use fincast_formula::{validate, BuildPlan, ValidationReport};
use thiserror::Error as ThisError;

pub mod layout;
mod plan;
pub mod sheets;

pub use plan::{build_plan, TAB_ORDER};

/// Errors from building or validating the model
#[derive(Debug, ThisError)]
pub enum Error {
    /// A populator failed to write a cell
    #[error(transparent)]
    Workbook(#[from] fincast_core::Error),

    /// Reference validation or order verification failed
    #[error(transparent)]
    Reference(#[from] fincast_formula::Error),

    /// The build plan names a step with no registered populator
    #[error("no populator registered for build step '{0}'")]
    UnknownStep(String),
}

/// Build the workbook without validating it
///
/// Useful for tests that inspect or perturb the raw model; production
/// callers want [`build_validated`].
pub fn build() -> Result<Workbook, Error> {
    let mut wb = Workbook::new();
    plan::run(&mut wb)?;
    Ok(wb)
}

/// Build the workbook, validate every reference, and verify the build order
///
/// The returned report lists the discovered sheet dependencies; any
/// dangling reference, self reference, cycle, or order violation aborts
/// with the matching error and no partial result.
pub fn build_validated() -> Result<(Workbook, ValidationReport), Error> {
    let wb = build()?;

    let report = validate(&wb)?;
    report.ensure()?;

    let plan: BuildPlan = build_plan();
    plan.verify(&report)?;

    log::info!(
        "validated {} formulas across {} sheets ({} dependency edges)",
        report.formulas_checked,
        wb.sheet_count(),
        report.edges.len()
    );

    Ok((wb, report))
}
