//! Closed intent payloads and the dashboard that applies them.
//!
//! Each operation has its own payload struct that rejects unknown fields, so
//! a malformed intent fails at the boundary instead of being half-read.
//! [`Dashboard`] composes the role context with the team store and answers
//! every applied intent with a fresh snapshot.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::context::ServiceContext;
use crate::draft::TaskDraft;
use crate::error::{Missing, Result, StoreError};
use crate::model::{Category, Filters, Member, MemberId, Priority, Status, Task, TaskId};
use crate::role::{Role, RoleContext};
use crate::seed::SeedError;
use crate::store::{TeamSnapshot, TeamStore};

/// Set a member's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetStatus {
    /// Target member.
    pub member_id: MemberId,
    /// New status.
    pub status: Status,
}

/// Set the current user's own status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetOwnStatus {
    /// New status.
    pub status: Status,
}

/// Assign a new task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignTask {
    /// Member receiving the task.
    pub member_id: MemberId,
    /// The task to create.
    pub task: TaskDraft,
}

/// Identifies one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskRef {
    /// Owning member.
    pub member_id: MemberId,
    /// The task.
    pub task_id: TaskId,
}

/// Set task progress (clamped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetProgress {
    /// Owning member.
    pub member_id: MemberId,
    /// The task.
    pub task_id: TaskId,
    /// Requested progress; clamped to 0..=100.
    pub progress: i64,
}

/// Set task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetPriority {
    /// Owning member.
    pub member_id: MemberId,
    /// The task.
    pub task_id: TaskId,
    /// New priority.
    pub priority: Priority,
}

/// Set task category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetCategory {
    /// Owning member.
    pub member_id: MemberId,
    /// The task.
    pub task_id: TaskId,
    /// New category.
    pub category: Category,
}

/// Record hours booked on a task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetHours {
    /// Owning member.
    pub member_id: MemberId,
    /// The task.
    pub task_id: TaskId,
    /// Hours booked; negative values clamp to zero.
    pub actual_hours: f64,
}

/// Add or remove one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagChange {
    /// Owning member.
    pub member_id: MemberId,
    /// The task.
    pub task_id: TaskId,
    /// Tag, normalized before use.
    pub tag: String,
}

/// Append a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddComment {
    /// Owning member.
    pub member_id: MemberId,
    /// The task.
    pub task_id: TaskId,
    /// Author; the current user when omitted.
    #[serde(default)]
    pub author: Option<String>,
    /// Comment body.
    pub message: String,
}

/// Change the priority of many tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BulkPriority {
    /// Tasks to update, across all members.
    pub task_ids: BTreeSet<TaskId>,
    /// New priority.
    pub priority: Priority,
}

/// Complete many tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BulkComplete {
    /// Tasks to complete, across all members.
    pub task_ids: BTreeSet<TaskId>,
}

/// Switch to `role`, or toggle when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchRole {
    /// Target role.
    #[serde(default)]
    pub role: Option<Role>,
}

/// Act as a different user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetCurrentUser {
    /// User name.
    pub name: String,
}

/// Every operation a UI can dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Intent {
    /// Reload the roster (synchronous placeholder).
    Fetch,
    /// See [`SetStatus`].
    SetStatus(SetStatus),
    /// See [`SetOwnStatus`].
    SetOwnStatus(SetOwnStatus),
    /// See [`AssignTask`].
    AssignTask(AssignTask),
    /// See [`SetProgress`].
    SetProgress(SetProgress),
    /// Complete one task.
    CompleteTask(TaskRef),
    /// See [`SetPriority`].
    SetPriority(SetPriority),
    /// See [`SetCategory`].
    SetCategory(SetCategory),
    /// See [`SetHours`].
    SetHours(SetHours),
    /// Add a tag.
    AddTag(TagChange),
    /// Remove a tag.
    RemoveTag(TagChange),
    /// See [`AddComment`].
    AddComment(AddComment),
    /// Delete one task.
    DeleteTask(TaskRef),
    /// See [`BulkPriority`].
    BulkUpdatePriority(BulkPriority),
    /// See [`BulkComplete`].
    BulkComplete(BulkComplete),
    /// Replace all filters.
    SetFilters(Filters),
    /// See [`SwitchRole`].
    SwitchRole(SwitchRole),
    /// See [`SetCurrentUser`].
    SetCurrentUser(SetCurrentUser),
}

impl Intent {
    /// The `op` tag of this intent.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::SetStatus(_) => "set_status",
            Self::SetOwnStatus(_) => "set_own_status",
            Self::AssignTask(_) => "assign_task",
            Self::SetProgress(_) => "set_progress",
            Self::CompleteTask(_) => "complete_task",
            Self::SetPriority(_) => "set_priority",
            Self::SetCategory(_) => "set_category",
            Self::SetHours(_) => "set_hours",
            Self::AddTag(_) => "add_tag",
            Self::RemoveTag(_) => "remove_tag",
            Self::AddComment(_) => "add_comment",
            Self::DeleteTask(_) => "delete_task",
            Self::BulkUpdatePriority(_) => "bulk_update_priority",
            Self::BulkComplete(_) => "bulk_complete",
            Self::SetFilters(_) => "set_filters",
            Self::SwitchRole(_) => "switch_role",
            Self::SetCurrentUser(_) => "set_current_user",
        }
    }
}

/// Role state plus team state, as seen after an intent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Acting role.
    pub role: Role,
    /// Current user.
    pub current_user: String,
    /// Team state.
    #[serde(flatten)]
    pub team: TeamSnapshot,
}

/// The two stores that make up one session's state tree.
pub struct Dashboard {
    roles: RoleContext,
    store: TeamStore,
}

impl Dashboard {
    /// Wraps `store`; every member becomes an available user.
    #[must_use]
    pub fn new(store: TeamStore) -> Self {
        let users = store.members().iter().map(|m| m.name.clone()).collect();
        Self { roles: RoleContext::new(users), store }
    }

    /// Dashboard over the built-in roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded roster fails to load.
    pub fn seeded(ctx: ServiceContext) -> std::result::Result<Self, SeedError> {
        TeamStore::seeded(ctx).map(Self::new)
    }

    /// Role state.
    #[must_use]
    pub fn roles(&self) -> &RoleContext {
        &self.roles
    }

    /// Team state.
    #[must_use]
    pub fn store(&self) -> &TeamStore {
        &self.store
    }

    /// Copies the current state.
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            role: self.roles.role(),
            current_user: self.roles.current_user().to_string(),
            team: self.store.snapshot(),
        }
    }

    /// The member the current user maps to, if any.
    #[must_use]
    pub fn current_member(&self) -> Option<&Member> {
        self.store.member_by_name(self.roles.current_user())
    }

    /// The role-scoped task view.
    ///
    /// A lead sees every task passing the priority and category filters; a
    /// member sees their own list, unfiltered. A current user with no
    /// matching member sees nothing.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<(MemberId, &Task)> {
        match self.roles.role() {
            Role::Lead => self.store.filtered_tasks(),
            Role::Member => self
                .current_member()
                .map(|m| m.tasks.iter().map(|t| (m.id, t)).collect())
                .unwrap_or_default(),
        }
    }

    /// Applies one intent and returns the resulting state.
    ///
    /// # Errors
    ///
    /// Returns the store's error; the state is unchanged when that happens.
    pub fn apply(&mut self, intent: Intent) -> Result<DashboardSnapshot> {
        debug!(op = intent.name(), "applying intent");
        let store = &mut self.store;
        match intent {
            Intent::Fetch => store.fetch(),
            Intent::SetStatus(p) => store.set_status(p.member_id, p.status)?,
            Intent::SetOwnStatus(p) => {
                let user = self.roles.current_user();
                let member_id = store
                    .member_by_name(user)
                    .map(|m| m.id)
                    .ok_or_else(|| StoreError::NotFound(Missing::User(user.to_string())))?;
                store.set_status(member_id, p.status)?;
            }
            Intent::AssignTask(p) => {
                store.assign_task(p.member_id, &p.task)?;
            }
            Intent::SetProgress(p) => store.set_task_progress(p.member_id, p.task_id, p.progress)?,
            Intent::CompleteTask(p) => store.complete_task(p.member_id, p.task_id)?,
            Intent::SetPriority(p) => store.set_task_priority(p.member_id, p.task_id, p.priority)?,
            Intent::SetCategory(p) => store.set_task_category(p.member_id, p.task_id, p.category)?,
            Intent::SetHours(p) => store.set_task_hours(p.member_id, p.task_id, p.actual_hours)?,
            Intent::AddTag(p) => {
                store.add_tag(p.member_id, p.task_id, &p.tag)?;
            }
            Intent::RemoveTag(p) => {
                store.remove_tag(p.member_id, p.task_id, &p.tag)?;
            }
            Intent::AddComment(p) => {
                let author = p.author.unwrap_or_else(|| self.roles.current_user().to_string());
                store.add_comment(p.member_id, p.task_id, &author, &p.message)?;
            }
            Intent::DeleteTask(p) => store.delete_task(p.member_id, p.task_id)?,
            Intent::BulkUpdatePriority(p) => {
                let outcome = store.bulk_update_priority(p.task_ids, p.priority);
                if !outcome.missing.is_empty() {
                    info!(missing = ?outcome.missing, "bulk priority skipped unknown tasks");
                }
            }
            Intent::BulkComplete(p) => {
                let outcome = store.bulk_complete(p.task_ids);
                if !outcome.missing.is_empty() {
                    info!(missing = ?outcome.missing, "bulk complete skipped unknown tasks");
                }
            }
            Intent::SetFilters(filters) => store.set_filters(filters),
            Intent::SwitchRole(p) => {
                self.roles.switch_role(p.role);
            }
            Intent::SetCurrentUser(p) => self.roles.set_current_user(p.name),
        }
        Ok(self.snapshot())
    }
}
