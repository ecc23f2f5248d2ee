//! List command implementation
//!
//! Prints every alias in the table, include-expanded unless `--raw`.

use anyhow::Result;
use colored::Colorize;
use mailalias::TableShape;
use std::process::ExitCode;

use super::json_output::{JsonError, ListOutput};
use super::load_table;
use crate::settings::LoadOptions;

/// Run the list command
///
/// # Arguments
/// * `options` - Config and alias file selection
/// * `shape` - Table representation to build
/// * `raw` - Skip include expansion
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every record expanded, 1 otherwise
pub fn run(
    options: &LoadOptions,
    shape: TableShape,
    raw: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let (table, report) = load_table(options, shape, !raw)?;

    let mut records = table.records();
    if shape == TableShape::Set {
        records.sort_by(|a, b| a.name.cmp(&b.name));
    }

    if json_output {
        let output = ListOutput {
            success: report.is_ok(),
            alias_file: report.path.display().to_string(),
            records,
            errors: report.failures.iter().map(JsonError::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for record in &records {
            println!("{}: {}", record.name.bold(), record.expansion);
        }
        for failure in &report.failures {
            eprintln!(
                "{} {}: {}",
                "!".yellow(),
                failure.name,
                failure.error.to_string().dimmed()
            );
        }
    }

    Ok(if report.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
