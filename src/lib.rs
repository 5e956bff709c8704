//! Core library for `teampulse`: team status and task tracking.
//!
//! The state tree is two stores. [`role::RoleContext`] knows who is acting
//! and in which role; [`store::TeamStore`] owns the members, their tasks and
//! the view filters, and exposes every mutation and derived view.
//! [`intent::Dashboard`] composes the two behind one closed set of intents.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod draft;
pub mod error;
pub mod intent;
pub mod logging;
pub mod model;
pub mod ports;
pub mod role;
pub mod seed;
pub mod store;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing, configuration, or command
/// execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    let config = config::Config::from_env()?;
    logging::init(&config.log_filter);
    commands::dispatch(&cli.command, &config)
}
