//! Runtime configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first when present.

use std::env;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::context::ServiceContext;
use crate::model::Member;
use crate::seed;

/// Points the store at a replacement roster file.
pub const SEED_VAR: &str = "TEAMPULSE_SEED";
/// Pins the clock to an RFC 3339 instant.
pub const NOW_VAR: &str = "TEAMPULSE_NOW";
/// Tracing filter directive.
pub const LOG_VAR: &str = "TEAMPULSE_LOG";

/// Filter used when neither `TEAMPULSE_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "teampulse=warn";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Roster file to load instead of the built-in one.
    pub seed_path: Option<PathBuf>,
    /// Instant the clock is pinned to.
    pub now: Option<DateTime<Utc>>,
    /// Tracing filter directive.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { seed_path: None, now: None, log_filter: DEFAULT_LOG_FILTER.to_string() }
    }
}

impl Config {
    /// Reads configuration from `.env` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a `.env` file exists but cannot be read or parsed,
    /// or if `TEAMPULSE_NOW` is set but not an RFC 3339 instant.
    pub fn from_env() -> Result<Self, String> {
        check_dotenv(dotenvy::dotenv())?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the `TEAMPULSE_NOW` value is not an RFC 3339 instant.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let now = non_empty(NOW_VAR)
            .map(|raw| {
                DateTime::parse_from_rfc3339(raw.trim())
                    .map(|t| t.with_timezone(&Utc))
                    .map_err(|e| format!("{NOW_VAR} must be an RFC 3339 timestamp ('{raw}'): {e}"))
            })
            .transpose()?;

        Ok(Self {
            seed_path: non_empty(SEED_VAR).map(PathBuf::from),
            now,
            log_filter: non_empty(LOG_VAR)
                .or_else(|| non_empty("RUST_LOG"))
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    /// Builds the service context: pinned clock if configured, else live.
    #[must_use]
    pub fn context(&self) -> ServiceContext {
        self.now.map_or_else(ServiceContext::live, ServiceContext::fixed)
    }

    /// Loads the configured roster, or the built-in one.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster cannot be read or is invalid.
    pub fn roster(&self) -> Result<Vec<Member>, String> {
        match &self.seed_path {
            Some(path) => seed::from_file(path),
            None => seed::built_in(),
        }
        .map_err(|e| e.to_string())
    }
}

/// Accepts a loaded or absent `.env` file; anything else is an error.
fn check_dotenv<T>(result: dotenvy::Result<T>) -> Result<(), String> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(format!("Failed to load .env: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            (SEED_VAR, "/tmp/roster.yaml"),
            (NOW_VAR, "2025-01-20T09:00:00Z"),
            (LOG_VAR, "teampulse=debug"),
        ]))
        .unwrap();
        assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/roster.yaml")));
        assert_eq!(config.now.unwrap().to_rfc3339(), "2025-01-20T09:00:00+00:00");
        assert_eq!(config.log_filter, "teampulse=debug");
    }

    #[test]
    fn falls_back_to_rust_log() {
        let config = Config::from_lookup(lookup(&[("RUST_LOG", "info")])).unwrap();
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn bad_timestamp_names_the_variable() {
        let err = Config::from_lookup(lookup(&[(NOW_VAR, "tomorrow")])).unwrap_err();
        assert!(err.contains(NOW_VAR));
    }

    #[test]
    fn pinned_clock_reaches_context() {
        let config =
            Config::from_lookup(lookup(&[(NOW_VAR, "2025-01-20T09:00:00+02:00")])).unwrap();
        assert_eq!(config.context().clock.now().to_rfc3339(), "2025-01-20T07:00:00+00:00");
    }

    #[test]
    fn absent_dotenv_is_fine() {
        assert!(check_dotenv(dotenvy::from_path("/nonexistent/teampulse/.env")).is_ok());
        assert!(check_dotenv(Ok(())).is_ok());
    }

    #[test]
    fn malformed_dotenv_is_an_error() {
        let parse_error = dotenvy::Error::LineParse("TEAMPULSE_LOG='open".into(), 14);
        let err = check_dotenv::<()>(Err(parse_error)).unwrap_err();
        assert!(err.starts_with("Failed to load .env"));
    }

    #[test]
    fn built_in_roster_when_no_seed_path() {
        let roster = Config::default().roster().unwrap();
        assert_eq!(roster.len(), 5);
    }
}
