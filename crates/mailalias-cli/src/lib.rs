//! mailalias CLI library.
//!
//! Provides the command implementations behind the `mailalias` binary,
//! along with configuration loading and log setup.

pub mod commands;
pub mod logging;
pub mod settings;
