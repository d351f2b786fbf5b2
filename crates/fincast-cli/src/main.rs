//! fincast - generate the financial model workbook

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fincast_xlsx::XlsxWriter;

#[derive(Parser)]
#[command(name = "fincast")]
#[command(
    author,
    version,
    about = "Generate a validated multi-sheet financial model workbook"
)]
struct Cli {
    /// Output file path
    #[arg(default_value = "Financial_Model.xlsx")]
    output: PathBuf,

    /// Build and validate without writing the output file
    #[arg(long)]
    check: bool,

    /// Print the validation report as JSON to stdout
    #[arg(long)]
    report: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // All validation happens before the file is touched: a half-consistent
    // model is worse than no output.
    let (workbook, report) =
        fincast_model::build_validated().context("financial model failed validation")?;

    if cli.report {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        );
    }

    if cli.check {
        eprintln!(
            "ok: {} formulas validated across {} sheets",
            report.formulas_checked,
            workbook.sheet_count()
        );
        return Ok(());
    }

    XlsxWriter::write_file(&workbook, &cli.output)
        .with_context(|| format!("failed to write '{}'", cli.output.display()))?;

    eprintln!("wrote {}", cli.output.display());
    Ok(())
}
