//! Initial team roster.
//!
//! The built-in roster is five members holding seven tasks, embedded as YAML.
//! A replacement roster in the same format can be loaded from a file.

use std::path::Path;

use crate::model::Member;

const BUILT_IN: &str = include_str!("roster.yaml");

/// Failure to load a roster.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The roster file could not be read.
    #[error("failed to read roster {path}: {source}")]
    Read {
        /// File that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The roster is not valid YAML for the member schema.
    #[error("failed to parse roster: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Two members share an id. Raised when a store is built over the roster.
    #[error("duplicate member id {0}")]
    DuplicateMember(u64),

    /// Two tasks share an id, possibly under different members.
    #[error("duplicate task id {0}")]
    DuplicateTask(u64),

    /// Two comments share an id.
    #[error("duplicate comment id {0}")]
    DuplicateComment(u64),
}

/// Returns the built-in roster.
///
/// # Errors
///
/// Returns an error only if the embedded roster is malformed.
pub fn built_in() -> Result<Vec<Member>, SeedError> {
    from_yaml(BUILT_IN)
}

/// Loads a roster from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or reuses an id.
pub fn from_file(path: &Path) -> Result<Vec<Member>, SeedError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| SeedError::Read { path: path.display().to_string(), source })?;
    from_yaml(&content)
}

/// Parses a roster.
///
/// Id uniqueness and the progress/completion coupling are enforced when the
/// roster is handed to [`crate::store::TeamStore::try_new`].
///
/// # Errors
///
/// Returns an error if the YAML does not match the member schema.
pub fn from_yaml(yaml: &str) -> Result<Vec<Member>, SeedError> {
    Ok(serde_yaml::from_str(yaml)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;

    const ONE_MEMBER: &str = r"
- id: 7
  name: Zoë Ångström
  email: zoe@example.com
  status: Break
  tasks:
    - id: 12
      title: Triage
      due_date: 2025-02-01
      progress: 100
      estimated_hours: 2
      assigned_by: Lead
      assigned_at: 2025-01-01T00:00:00Z
";

    #[test]
    fn built_in_roster_has_five_members_and_seven_tasks() {
        let members = built_in().unwrap();
        assert_eq!(members.len(), 5);
        assert_eq!(members.iter().map(|m| m.tasks.len()).sum::<usize>(), 7);

        let statuses: Vec<Status> = members.iter().map(|m| m.status).collect();
        assert_eq!(
            statuses,
            vec![Status::Working, Status::Meeting, Status::Break, Status::Working, Status::Offline]
        );
    }

    #[test]
    fn built_in_roster_respects_completion_coupling() {
        for member in built_in().unwrap() {
            for task in &member.tasks {
                assert_eq!(task.completed, task.progress == 100, "task {}", task.id);
            }
        }
    }

    #[test]
    fn missing_status_defaults_to_offline() {
        let members = from_yaml("- id: 1\n  name: A\n  email: a@example.com\n").unwrap();
        assert_eq!(members[0].status, Status::Offline);
        assert!(members[0].tasks.is_empty());
    }

    #[test]
    fn rejects_unknown_status() {
        let err = from_yaml("- {id: 1, name: A, email: a@x, status: Asleep}\n").unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }

    #[test]
    fn loads_roster_from_file() {
        let dir = std::env::temp_dir().join("teampulse_seed_from_file");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roster.yaml");
        std::fs::write(&path, ONE_MEMBER).unwrap();

        let members = from_file(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Zoë Ångström");
        assert_eq!(members[0].status, Status::Break);
        assert_eq!(members[0].tasks[0].id, 12);
        assert_eq!(members[0].tasks[0].progress, 100);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = from_file(Path::new("/nonexistent/teampulse/roster.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/teampulse/roster.yaml"));
    }
}
