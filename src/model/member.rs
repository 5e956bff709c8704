//! Team members.

use serde::{Deserialize, Serialize};

use super::label::Status;
use super::task::Task;
use super::{MemberId, TaskId};

/// A tracked participant with an availability status and an owned task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Stable member id.
    pub id: MemberId,
    /// Display name; also how the current user is matched to a member.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Availability.
    #[serde(default)]
    pub status: Status,
    /// Tasks in display order (assignment order).
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Member {
    /// Looks up one of this member's tasks.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub(crate) fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Tasks not yet completed, in list order.
    pub fn active_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    /// Completed tasks, in list order.
    pub fn completed_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.completed)
    }

    /// Number of tasks not yet completed.
    #[must_use]
    pub fn active_task_count(&self) -> usize {
        self.active_tasks().count()
    }
}
