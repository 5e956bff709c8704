//! Task drafts: the input to task assignment and its validation.
//!
//! A draft is checked field by field against today's date before anything
//! touches the store. Every failing field is collected so the caller can
//! report them all at once.

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Field, FieldError, ValidationError};
use crate::model::{normalize_tag, Category, Priority, Task, TaskId, MAX_TAGS, MAX_TITLE_CHARS};

/// Largest accepted estimate, in hours.
pub const MAX_ESTIMATED_HOURS: f64 = 200.0;

/// How far ahead a due date may be set.
const MAX_LEAD_MONTHS: u32 = 12;

fn default_estimated_hours() -> f64 {
    8.0
}

fn default_assigned_by() -> String {
    "Team Lead".to_string()
}

/// Everything needed to assign a new task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskDraft {
    /// Required, at most 100 characters once trimmed.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: String,
    /// Today or later, at most a year out.
    pub due_date: NaiveDate,
    /// Defaults to `Medium`.
    #[serde(default)]
    pub priority: Priority,
    /// Defaults to `Development`.
    #[serde(default)]
    pub category: Category,
    /// In `(0, 200]`; defaults to 8.
    #[serde(default = "default_estimated_hours")]
    pub estimated_hours: f64,
    /// Defaults to `"Team Lead"`.
    #[serde(default = "default_assigned_by")]
    pub assigned_by: String,
    /// Normalized and deduplicated; at most 10 after that.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Trimmed and deduplicated.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl TaskDraft {
    /// Creates a draft with every optional field at its default.
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date,
            priority: Priority::default(),
            category: Category::default(),
            estimated_hours: default_estimated_hours(),
            assigned_by: default_assigned_by(),
            tags: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Checks every field against `today`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming each invalid field.
    pub fn validate(&self, today: NaiveDate) -> Result<ValidatedDraft, ValidationError> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(field_error(Field::Title, "is required".to_string()));
        } else if title.chars().count() > MAX_TITLE_CHARS {
            errors.push(field_error(
                Field::Title,
                format!("must be at most {MAX_TITLE_CHARS} characters"),
            ));
        }

        if self.due_date < today {
            errors.push(field_error(Field::DueDate, "cannot be in the past".to_string()));
        } else if today
            .checked_add_months(Months::new(MAX_LEAD_MONTHS))
            .is_some_and(|latest| self.due_date > latest)
        {
            errors.push(field_error(
                Field::DueDate,
                "cannot be more than 1 year from now".to_string(),
            ));
        }

        let hours = self.estimated_hours;
        if !hours.is_finite() || hours <= 0.0 || hours > MAX_ESTIMATED_HOURS {
            errors.push(field_error(
                Field::EstimatedHours,
                format!("must be greater than 0 and at most {MAX_ESTIMATED_HOURS}"),
            ));
        }

        let mut tags: Vec<String> = Vec::new();
        for tag in self.tags.iter().filter_map(|t| normalize_tag(t)) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        if tags.len() > MAX_TAGS {
            errors.push(field_error(
                Field::Tags,
                format!("at most {MAX_TAGS} tags allowed, got {}", tags.len()),
            ));
        }

        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }

        let mut dependencies: Vec<String> = Vec::new();
        for dep in self.dependencies.iter().map(|d| d.trim()).filter(|d| !d.is_empty()) {
            if !dependencies.iter().any(|d| d == dep) {
                dependencies.push(dep.to_string());
            }
        }

        Ok(ValidatedDraft {
            title: title.to_string(),
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority,
            category: self.category,
            estimated_hours: hours,
            assigned_by: self.assigned_by.clone(),
            tags,
            dependencies,
        })
    }
}

fn field_error(field: Field, message: String) -> FieldError {
    FieldError { field, message }
}

/// A draft that passed validation, with tags and dependencies normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    title: String,
    description: String,
    due_date: NaiveDate,
    priority: Priority,
    category: Category,
    estimated_hours: f64,
    assigned_by: String,
    tags: Vec<String>,
    dependencies: Vec<String>,
}

impl ValidatedDraft {
    /// Builds a fresh task: no progress, no hours booked, no comments.
    pub(crate) fn into_task(self, id: TaskId, assigned_at: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            progress: 0,
            completed: false,
            priority: self.priority,
            category: self.category,
            estimated_hours: self.estimated_hours,
            actual_hours: 0.0,
            assigned_by: self.assigned_by,
            assigned_at,
            tags: self.tags,
            dependencies: self.dependencies,
            comments: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn accepts_minimal_draft() {
        let valid = TaskDraft::new("  Ship it  ", today()).validate(today()).unwrap();
        let task = valid.into_task(1, today().and_hms_opt(9, 0, 0).unwrap().and_utc());
        assert_eq!(task.title, "Ship it");
    }

    #[test]
    fn due_date_window_is_inclusive() {
        assert!(TaskDraft::new("a", day(2026, 1, 20)).validate(today()).is_ok());
        let err = TaskDraft::new("a", day(2026, 1, 21)).validate(today()).unwrap_err();
        assert_eq!(err.fields(), vec![Field::DueDate]);
        assert!(err.to_string().contains("1 year"));
    }

    #[test]
    fn reports_every_failing_field() {
        let draft = TaskDraft {
            estimated_hours: 0.0,
            tags: (0..11).map(|i| format!("tag{i}")).collect(),
            ..TaskDraft::new("   ", day(2025, 1, 19))
        };
        let err = draft.validate(today()).unwrap_err();
        assert_eq!(
            err.fields(),
            vec![Field::Title, Field::DueDate, Field::EstimatedHours, Field::Tags]
        );
    }

    #[test]
    fn title_length_counts_characters() {
        let exactly = "é".repeat(MAX_TITLE_CHARS);
        assert!(TaskDraft::new(exactly, today()).validate(today()).is_ok());

        let too_long = "x".repeat(MAX_TITLE_CHARS + 1);
        let err = TaskDraft::new(too_long, today()).validate(today()).unwrap_err();
        assert!(err.has(Field::Title));
    }

    #[test]
    fn estimated_hours_bounds() {
        let ok = TaskDraft { estimated_hours: 200.0, ..TaskDraft::new("a", today()) };
        assert!(ok.validate(today()).is_ok());

        for bad in [-1.0, 200.5, f64::NAN, f64::INFINITY] {
            let draft = TaskDraft { estimated_hours: bad, ..TaskDraft::new("a", today()) };
            assert!(draft.validate(today()).unwrap_err().has(Field::EstimatedHours));
        }
    }

    #[test]
    fn tags_and_dependencies_are_normalized() {
        let draft = TaskDraft {
            tags: vec!["API".into(), " api ".into(), String::new(), "Backend".into()],
            dependencies: vec!["TASK-1".into(), " TASK-1 ".into(), "  ".into()],
            ..TaskDraft::new("a", today())
        };
        let task = draft.validate(today()).unwrap().into_task(
            9,
            chrono::TimeZone::with_ymd_and_hms(&Utc, 2025, 1, 20, 9, 0, 0).unwrap(),
        );
        assert_eq!(task.tags, vec!["api", "backend"]);
        assert_eq!(task.dependencies, vec!["TASK-1"]);
        assert_eq!(task.progress, 0);
        assert!(!task.completed);
    }

    #[test]
    fn deserializes_with_defaults_and_rejects_unknown_fields() {
        let draft: TaskDraft =
            serde_yaml::from_str("title: Audit\ndue_date: 2025-02-01\n").unwrap();
        assert_eq!(draft.priority, Priority::Medium);
        assert_eq!(draft.category, Category::Development);
        assert_eq!(draft.assigned_by, "Team Lead");
        assert!((draft.estimated_hours - 8.0).abs() < f64::EPSILON);

        let result: Result<TaskDraft, _> =
            serde_yaml::from_str("title: Audit\ndue_date: 2025-02-01\nstatus: pending\n");
        assert!(result.is_err());
    }
}
