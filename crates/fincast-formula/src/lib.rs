//! # fincast-formula
//!
//! The reference-consistency core of the workbook builder:
//! - [`extract_refs`] - enumerate the cell/range references in a formula
//! - [`SheetGraph`] - the sheet-level dependency graph
//! - [`validate`] - check every reference before the file is written
//! - [`BuildPlan`] - the declared population order, verified against the
//!   discovered dependencies
//!
//! Nothing here evaluates formulas; the checks are purely about whether the
//! workbook's cross-sheet references are internally consistent.

pub mod error;
pub mod extract;
pub mod graph;
pub mod schedule;
pub mod validate;

pub use error::{Error, Result};
pub use extract::{extract_refs, FormulaRef};
pub use graph::SheetGraph;
pub use schedule::{BuildPlan, BuildStep};
pub use validate::{validate, SelfReference, UnresolvedReference, ValidationReport};
