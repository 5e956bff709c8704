//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::{Category, Filter, Priority, Status};
use crate::role::Role;

/// Top-level CLI parser for `teampulse`.
#[derive(Debug, Parser)]
#[command(name = "teampulse", version, about = "Track team status and task workload")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show how many members are in each status, plus team totals.
    Status,
    /// List members, busiest first.
    Members {
        /// Only members in this status (or `all`).
        #[arg(long, default_value = "all")]
        status: Filter<Status>,
    },
    /// List the tasks a role can see.
    Tasks {
        /// `lead` sees the team, `member` sees their own list.
        #[arg(long, default_value = "member")]
        role: Role,
        /// Act as this user instead of the role's default.
        #[arg(long)]
        user: Option<String>,
        /// Only tasks with this priority (lead view).
        #[arg(long, default_value = "all")]
        priority: Filter<Priority>,
        /// Only tasks in this category (lead view).
        #[arg(long, default_value = "all")]
        category: Filter<Category>,
    },
    /// Apply a YAML list of intents in order and report each result.
    Apply {
        /// Path to the intent script.
        script: PathBuf,
        /// Print the final state as JSON.
        #[arg(long)]
        json: bool,
    },
}
