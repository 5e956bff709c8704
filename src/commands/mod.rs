//! Command dispatch and handlers.
//!
//! Each handler builds its own [`Dashboard`] from the configuration, renders
//! a report to a string, and prints it.

pub mod apply;
pub mod members;
pub mod status;
pub mod tasks;

use crate::cli::Command;
use crate::config::Config;
use crate::intent::Dashboard;
use crate::store::TeamStore;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the roster cannot be loaded or the selected
/// command handler fails.
pub fn dispatch(command: &Command, config: &Config) -> Result<(), String> {
    let mut dashboard = load_dashboard(config)?;
    match command {
        Command::Status => status::run(&dashboard),
        Command::Members { status } => members::run(&mut dashboard, *status),
        Command::Tasks { role, user, priority, category } => {
            let query = tasks::TaskQuery {
                role: *role,
                user: user.clone(),
                priority: *priority,
                category: *category,
            };
            tasks::run(&mut dashboard, &query)
        }
        Command::Apply { script, json } => apply::run(&mut dashboard, script, *json),
    }
}

/// Builds a dashboard over the configured roster and clock.
///
/// # Errors
///
/// Returns an error string if the roster cannot be loaded or reuses an id.
pub fn load_dashboard(config: &Config) -> Result<Dashboard, String> {
    let roster = config.roster()?;
    let mut store = TeamStore::try_new(config.context(), roster).map_err(|e| e.to_string())?;
    store.fetch();
    Ok(Dashboard::new(store))
}
