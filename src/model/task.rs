//! Tasks and their comments.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::label::{Category, Priority};
use super::{CommentId, TaskId};

/// Progress value at which a task counts as completed.
pub const PROGRESS_COMPLETE: u8 = 100;

/// Maximum number of tags a task may hold.
pub const MAX_TAGS: usize = 10;

/// Maximum task title length, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// A note appended to a task. Comments are never edited or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment id.
    pub id: CommentId,
    /// Who wrote it.
    pub author: String,
    /// Comment body.
    pub message: String,
    /// When it was added.
    pub timestamp: DateTime<Utc>,
}

/// A unit of assigned work, owned by exactly one member.
///
/// `completed` is true exactly when `progress` is 100; every mutator in this
/// crate keeps the two in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique across all members.
    pub id: TaskId,
    /// Short title, at most [`MAX_TITLE_CHARS`] characters.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Calendar day the task is due.
    pub due_date: NaiveDate,
    /// Percent done, 0 to 100.
    #[serde(default)]
    pub progress: u8,
    /// Mirrors `progress == 100`.
    #[serde(default)]
    pub completed: bool,
    /// Urgency.
    #[serde(default)]
    pub priority: Priority,
    /// Kind of work.
    #[serde(default)]
    pub category: Category,
    /// Planned effort in hours.
    pub estimated_hours: f64,
    /// Hours booked so far, never negative.
    #[serde(default)]
    pub actual_hours: f64,
    /// Name of whoever assigned the task.
    pub assigned_by: String,
    /// When the task was assigned.
    pub assigned_at: DateTime<Utc>,
    /// Normalized, unique tags in insertion order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-form references to work this task waits on.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Discussion, oldest first.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Trims and lower-cases a tag. Returns `None` for a blank tag.
#[must_use]
pub fn normalize_tag(tag: &str) -> Option<String> {
    let tag = tag.trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_lowercase())
    }
}

impl Task {
    /// Returns `true` if the task is unfinished and its due date has passed.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date < today
    }

    /// Sets progress, clamped to 0..=100, and re-derives `completed`.
    pub(crate) fn set_progress(&mut self, progress: i64) {
        let clamped = progress.clamp(0, i64::from(PROGRESS_COMPLETE));
        self.progress = u8::try_from(clamped).unwrap_or(PROGRESS_COMPLETE);
        self.completed = self.progress == PROGRESS_COMPLETE;
    }

    /// Adds a tag. Returns `false` when blank, already present, or the task is full.
    pub(crate) fn add_tag(&mut self, tag: &str) -> bool {
        let Some(tag) = normalize_tag(tag) else {
            return false;
        };
        if self.tags.contains(&tag) || self.tags.len() >= MAX_TAGS {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Removes a tag. Returns `false` when it was not present.
    pub(crate) fn remove_tag(&mut self, tag: &str) -> bool {
        let Some(tag) = normalize_tag(tag) else {
            return false;
        };
        let before = self.tags.len();
        self.tags.retain(|t| *t != tag);
        self.tags.len() != before
    }

    /// Restores the progress/completion coupling on data loaded from outside.
    pub(crate) fn reconcile(&mut self) {
        self.set_progress(i64::from(self.progress));
        if self.actual_hours.is_nan() || self.actual_hours < 0.0 {
            self.actual_hours = 0.0;
        }
        let mut seen = Vec::with_capacity(self.tags.len());
        for tag in self.tags.drain(..).filter_map(|t| normalize_tag(&t)) {
            if !seen.contains(&tag) && seen.len() < MAX_TAGS {
                seen.push(tag);
            }
        }
        self.tags = seen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_task() -> Task {
        Task {
            id: 1,
            title: "Write report".to_string(),
            description: String::new(),
            due_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            progress: 0,
            completed: false,
            priority: Priority::Medium,
            category: Category::Documentation,
            estimated_hours: 4.0,
            actual_hours: 0.0,
            assigned_by: "Sarah Wilson".to_string(),
            assigned_at: Utc.with_ymd_and_hms(2025, 1, 20, 9, 0, 0).unwrap(),
            tags: Vec::new(),
            dependencies: Vec::new(),
            comments: Vec::new(),
        }
    }

    #[test]
    fn progress_is_clamped_and_coupled() {
        let mut task = sample_task();
        task.set_progress(250);
        assert_eq!(task.progress, 100);
        assert!(task.completed);

        task.set_progress(-5);
        assert_eq!(task.progress, 0);
        assert!(!task.completed);
    }

    #[test]
    fn reopening_clears_completed() {
        let mut task = sample_task();
        task.set_progress(100);
        task.set_progress(99);
        assert!(!task.completed);
        assert_eq!(task.progress, 99);
    }

    #[test]
    fn tags_are_normalized_and_unique() {
        let mut task = sample_task();
        assert!(task.add_tag("  Backend "));
        assert!(!task.add_tag("backend"));
        assert!(!task.add_tag("   "));
        assert_eq!(task.tags, vec!["backend"]);

        assert!(task.remove_tag("BackEnd"));
        assert!(!task.remove_tag("backend"));
        assert!(task.tags.is_empty());
    }

    #[test]
    fn tag_limit_is_enforced() {
        let mut task = sample_task();
        for i in 0..MAX_TAGS {
            assert!(task.add_tag(&format!("t{i}")));
        }
        assert!(!task.add_tag("one-too-many"));
        assert_eq!(task.tags.len(), MAX_TAGS);
    }

    #[test]
    fn overdue_only_when_open_and_past_due() {
        let mut task = sample_task();
        let after = NaiveDate::from_ymd_opt(2025, 2, 2).unwrap();
        let on = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert!(task.is_overdue(after));
        assert!(!task.is_overdue(on));

        task.set_progress(100);
        assert!(!task.is_overdue(after));
    }

    #[test]
    fn reconcile_repairs_inconsistent_input() {
        let mut task = sample_task();
        task.progress = 100;
        task.completed = false;
        task.actual_hours = -3.0;
        task.tags = vec!["CSS".into(), "css".into(), " ".into()];
        task.reconcile();

        assert!(task.completed);
        assert!(task.actual_hours.abs() < f64::EPSILON);
        assert_eq!(task.tags, vec!["css"]);
    }
}
