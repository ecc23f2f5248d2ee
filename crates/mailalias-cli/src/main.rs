//! mailalias CLI - Command-line interface for sendmail-style alias files
//!
//! This binary lists, looks up and checks alias tables built from an
//! `aliases(5)` file, with `:include:` directives expanded.

use clap::Parser;
use std::process::ExitCode;

use mailalias_cli::settings::LoadOptions;
use mailalias_cli::{commands, logging};

mod cli_args;

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let options = LoadOptions {
        config: cli.config,
        file: cli.file,
        include_limit: cli.include_limit,
    };

    let result = match cli.command {
        Commands::List { table, raw, json } => {
            commands::list::run(&options, table.into(), raw, json)
        }
        Commands::Show { name, json } => commands::show::run(&options, &name, json),
        Commands::Check { json } => commands::check::run(&options, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
