//! Check command implementation
//!
//! Builds the alias table and reports every record whose includes could
//! not be expanded.

use anyhow::Result;
use colored::Colorize;
use mailalias::TableShape;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{BuildSummary, CheckOutput, JsonError};
use super::load_table;
use crate::settings::LoadOptions;

/// Run the check command
///
/// # Returns
/// Exit code: 0 if every record expanded, 1 otherwise
pub fn run(options: &LoadOptions, json_output: bool) -> Result<ExitCode> {
    let start = Instant::now();
    let (_table, report) = load_table(options, TableShape::List, true)?;
    let summary = BuildSummary::from(&report);

    if json_output {
        let output = CheckOutput {
            success: report.is_ok(),
            alias_file: report.path.display().to_string(),
            summary,
            errors: report.failures.iter().map(JsonError::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "Checking:".cyan().bold(), report.path.display());
        for failure in &report.failures {
            println!(
                "  {} {} [{}]: {}",
                "x".red(),
                failure.name.bold(),
                failure.error.code(),
                failure.error
            );
        }
        println!(
            "{} {} parsed, {} defined, {} expanded, {} failed ({} ms)",
            "Summary:".dimmed(),
            summary.parsed,
            summary.defined,
            summary.expanded,
            summary.failed,
            start.elapsed().as_millis()
        );
        if report.is_ok() {
            println!("{}", "OK".green().bold());
        } else {
            println!("{}", "FAILED".red().bold());
        }
    }

    Ok(if report.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
