//! CLI argument definitions for the mailalias command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use mailalias::TableShape;

/// mailalias - Sendmail-style alias file inspector
#[derive(Parser)]
#[command(name = "mailalias")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Configuration file (JSON); default: <config dir>/mailalias/config.json
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Alias file to read (default: $MAILALIAS_FILE or ~/etc/aliases)
    #[arg(short, long, global = true)]
    pub file: Option<String>,

    /// Maximum include nesting depth per alias
    #[arg(long, global = true)]
    pub include_limit: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print every alias with its expansion
    List {
        /// Table representation
        #[arg(long, value_enum, default_value_t = TableArg::List)]
        table: TableArg,

        /// Print expansions as written, without substituting includes
        #[arg(long)]
        raw: bool,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the expansion of one alias
    Show {
        /// Alias name
        name: String,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the table and report aliases whose includes fail
    Check {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

/// Table representation selectable with `list --table`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum TableArg {
    /// Unordered, keyed by name
    Set,
    /// File order
    List,
}

impl From<TableArg> for TableShape {
    fn from(arg: TableArg) -> Self {
        match arg {
            TableArg::Set => TableShape::Set,
            TableArg::List => TableShape::List,
        }
    }
}
