//! Team store: the single owner of members, their tasks and the view filters.
//!
//! Every write goes through a named operation that either applies completely
//! or leaves the store untouched. Lookups that miss return
//! [`StoreError::NotFound`] and change nothing, so callers can treat them as
//! no-ops. Derived views are computed from current state on every call.
//!
//! ```text
//! TeamStore
//!   ├── members[]  ── tasks[] ── comments[]
//!   ├── filters    (status / priority / category)
//!   └── ctx        (clock, task ids, comment ids)
//! ```

mod bulk;
mod tasks;
mod views;

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::context::ServiceContext;
use crate::error::{Missing, Result, StoreError};
use crate::model::{
    Category, Filter, Filters, Member, MemberId, Priority, Status, Task, TaskId,
};
use crate::seed::{self, SeedError};

pub use bulk::BulkOutcome;
pub use views::{sorted_by_workload, TeamSummary, Workload};

/// Owns the roster and applies every mutation to it.
pub struct TeamStore {
    ctx: ServiceContext,
    members: Vec<Member>,
    filters: Filters,
    loading: bool,
}

/// An owned copy of the store's state at one moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSnapshot {
    /// Members with their tasks, in roster order.
    pub members: Vec<Member>,
    /// Active filters.
    pub filters: Filters,
    /// Whether a load is in flight (always `false`; loading is synchronous).
    pub loading: bool,
}

impl TeamStore {
    /// Creates a store over `members`, checking and normalizing them first.
    ///
    /// Member ids must be unique, and task and comment ids must be unique
    /// across the whole roster. Every task is reconciled so `completed`
    /// agrees with `progress` and tags are normalized. Every task and comment
    /// id is then fed to the context's generators, so ids allocated later
    /// never collide with the given ones.
    ///
    /// # Errors
    ///
    /// Returns the `Duplicate*` [`SeedError`] for the first reused id.
    pub fn try_new(
        ctx: ServiceContext,
        mut members: Vec<Member>,
    ) -> std::result::Result<Self, SeedError> {
        let mut member_ids = HashSet::new();
        let mut task_ids = HashSet::new();
        let mut comment_ids = HashSet::new();
        for member in &mut members {
            if !member_ids.insert(member.id) {
                return Err(SeedError::DuplicateMember(member.id));
            }
            for task in &mut member.tasks {
                if !task_ids.insert(task.id) {
                    return Err(SeedError::DuplicateTask(task.id));
                }
                for comment in &task.comments {
                    if !comment_ids.insert(comment.id) {
                        return Err(SeedError::DuplicateComment(comment.id));
                    }
                }
                task.reconcile();
            }
        }

        task_ids.into_iter().for_each(|id| ctx.task_ids.observe(id));
        comment_ids.into_iter().for_each(|id| ctx.comment_ids.observe(id));
        Ok(Self { ctx, members, filters: Filters::default(), loading: false })
    }

    /// Creates a store over the built-in roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded roster fails to load.
    pub fn seeded(ctx: ServiceContext) -> std::result::Result<Self, SeedError> {
        Self::try_new(ctx, seed::built_in()?)
    }

    /// Placeholder for loading the roster from a real data source.
    ///
    /// Completes immediately and leaves the store idle.
    pub fn fetch(&mut self) {
        self.loading = false;
        debug!(members = self.members.len(), "fetch completed");
    }

    /// Whether a load is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The service context (clock and id generators).
    #[must_use]
    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    /// All members, in roster order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Looks up a member by id.
    #[must_use]
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Looks up a member by exact name.
    #[must_use]
    pub fn member_by_name(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Looks up one task of one member.
    #[must_use]
    pub fn task(&self, member_id: MemberId, task_id: TaskId) -> Option<&Task> {
        self.member(member_id).and_then(|m| m.task(task_id))
    }

    /// The active filters.
    #[must_use]
    pub fn filters(&self) -> Filters {
        self.filters
    }

    /// Copies the current state.
    #[must_use]
    pub fn snapshot(&self) -> TeamSnapshot {
        TeamSnapshot {
            members: self.members.clone(),
            filters: self.filters,
            loading: self.loading,
        }
    }

    /// Sets a member's status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no member has `member_id`.
    pub fn set_status(&mut self, member_id: MemberId, status: Status) -> Result<()> {
        let member = self.member_mut(member_id)?;
        member.status = status;
        debug!(member_id, %status, "member status changed");
        Ok(())
    }

    /// Replaces all three filters.
    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
        debug!(
            status = %filters.status,
            priority = %filters.priority,
            category = %filters.category,
            "filters replaced"
        );
    }

    /// Replaces the status filter only.
    pub fn set_status_filter(&mut self, status: Filter<Status>) {
        self.set_filters(Filters { status, ..self.filters });
    }

    /// Replaces the priority filter only.
    pub fn set_priority_filter(&mut self, priority: Filter<Priority>) {
        self.set_filters(Filters { priority, ..self.filters });
    }

    /// Replaces the category filter only.
    pub fn set_category_filter(&mut self, category: Filter<Category>) {
        self.set_filters(Filters { category, ..self.filters });
    }

    fn member_mut(&mut self, member_id: MemberId) -> Result<&mut Member> {
        self.members.iter_mut().find(|m| m.id == member_id).ok_or_else(|| {
            debug!(member_id, "member not found; operation ignored");
            StoreError::NotFound(Missing::Member(member_id))
        })
    }

    fn task_mut(&mut self, member_id: MemberId, task_id: TaskId) -> Result<&mut Task> {
        self.member_mut(member_id)?.task_mut(task_id).ok_or_else(|| {
            debug!(member_id, task_id, "task not found; operation ignored");
            StoreError::NotFound(Missing::Task { member_id, task_id })
        })
    }
}
