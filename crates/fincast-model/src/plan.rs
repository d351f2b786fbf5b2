//! The declared build plan
//!
//! Tab order is fixed by the output contract; population order is a
//! topological order of the sheet dependencies, with the one declared
//! patch (Balance_Sheet cash ← Cash_Flow ending balances). The scheduler
//! re-verifies this order against the dependencies actually discovered in
//! the populated workbook, so reordering steps here is a checked change,
//! not a silent bug source.

use fincast_core::Workbook;
use fincast_formula::{BuildPlan, BuildStep};

use crate::sheets;
use crate::Error;

/// Worksheet tab order of the output file
pub const TAB_ORDER: [&str; 14] = [
    "Dashboard",
    "Business_Overview",
    "Assumptions",
    "Revenue_Forecast",
    "COGS_Budget",
    "OPEX_Budget",
    "Income_Statement",
    "Balance_Sheet",
    "Cash_Flow",
    "Stock_Valuation",
    "Bond_Valuation",
    "Capital_Budgeting",
    "Sensitivity_Analysis",
    "Contributions",
];

/// The declared population order
pub fn build_plan() -> BuildPlan {
    BuildPlan::new()
        .populate("Business_Overview")
        .populate("Contributions")
        .populate("Assumptions")
        .populate("Revenue_Forecast")
        .populate("COGS_Budget")
        .populate("OPEX_Budget")
        .populate("Income_Statement")
        .populate("Balance_Sheet")
        .populate("Cash_Flow")
        .patch("Balance_Sheet", "Cash_Flow")
        .populate("Bond_Valuation")
        .populate("Capital_Budgeting")
        .populate("Stock_Valuation")
        .populate("Sensitivity_Analysis")
        .populate("Dashboard")
}

type Populator = fn(&mut Workbook) -> fincast_core::Result<()>;

fn populator_for(sheet: &str) -> Option<Populator> {
    Some(match sheet {
        "Dashboard" => sheets::dashboard::populate,
        "Business_Overview" => sheets::business_overview::populate,
        "Assumptions" => sheets::assumptions::populate,
        "Revenue_Forecast" => sheets::revenue_forecast::populate,
        "COGS_Budget" => sheets::cogs_budget::populate,
        "OPEX_Budget" => sheets::opex_budget::populate,
        "Income_Statement" => sheets::income_statement::populate,
        "Balance_Sheet" => sheets::balance_sheet::populate,
        "Cash_Flow" => sheets::cash_flow::populate,
        "Stock_Valuation" => sheets::stock_valuation::populate,
        "Bond_Valuation" => sheets::bond_valuation::populate,
        "Capital_Budgeting" => sheets::capital_budgeting::populate,
        "Sensitivity_Analysis" => sheets::sensitivity_analysis::populate,
        "Contributions" => sheets::contributions::populate,
        _ => return None,
    })
}

fn patch_for(sheet: &str) -> Option<Populator> {
    match sheet {
        "Balance_Sheet" => Some(sheets::cash_flow::link_balance_sheet_cash),
        _ => None,
    }
}

/// Register all sheets and run the declared plan
pub(crate) fn run(wb: &mut Workbook) -> Result<(), Error> {
    for name in TAB_ORDER {
        wb.add_sheet(name)?;
    }

    for step in build_plan().steps() {
        match step {
            BuildStep::Populate(name) => {
                log::debug!("populating {name}");
                let populate =
                    populator_for(name).ok_or_else(|| Error::UnknownStep(name.clone()))?;
                populate(wb)?;
            }
            BuildStep::Patch { sheet, .. } => {
                log::debug!("patching {sheet}");
                let patch = patch_for(sheet).ok_or_else(|| Error::UnknownStep(sheet.clone()))?;
                patch(wb)?;
            }
        }
    }

    Ok(())
}
