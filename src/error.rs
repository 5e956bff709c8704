//! Error types for store operations.

use std::fmt;

use crate::model::{MemberId, TaskId};

/// A task draft field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Task title.
    Title,
    /// Due date.
    DueDate,
    /// Estimated hours.
    EstimatedHours,
    /// Tag list.
    Tags,
}

impl Field {
    /// Field name as it appears in payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::DueDate => "due_date",
            Self::EstimatedHours => "estimated_hours",
            Self::Tags => "tags",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failing field and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The offending field.
    pub field: Field,
    /// Human-readable reason.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A rejected task draft, listing every failing field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid task: {}", join(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

fn join(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

impl ValidationError {
    /// Wraps a non-empty list of field errors.
    #[must_use]
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// The failing fields, in field order.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        self.errors.iter().map(|e| e.field).collect()
    }

    /// Returns `true` if `field` is among the failures.
    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// What a failed lookup was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    /// No member with this id.
    Member(MemberId),
    /// The member exists but holds no task with this id.
    Task {
        /// Member that was searched.
        member_id: MemberId,
        /// Task that was not found.
        task_id: TaskId,
    },
    /// No member is named after the current user.
    User(String),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member(id) => write!(f, "member {id}"),
            Self::Task { member_id, task_id } => write!(f, "task {task_id} of member {member_id}"),
            Self::User(name) => write!(f, "member named '{name}'"),
        }
    }
}

/// Failure of a store operation. The store is left unchanged in every case.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Task draft rejected before anything was applied.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Referenced member, task or user does not exist.
    #[error("{0} not found")]
    NotFound(Missing),

    /// Numeric input that cannot be clamped into its band.
    #[error("{field} out of range: {value}")]
    Range {
        /// Name of the offending input.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// No fresh id is left for a new task or comment.
    #[error("no {0} ids left to allocate")]
    IdsExhausted(&'static str),
}

impl StoreError {
    /// Returns `true` for lookup failures, which callers may treat as no-ops.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, StoreError>;
