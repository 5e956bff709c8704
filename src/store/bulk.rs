//! Operations applied to many tasks at once, across every member.
//!
//! Each id is handled on its own: ids that match no task are collected in
//! [`BulkOutcome::missing`] and never stop the rest of the batch.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use super::TeamStore;
use crate::model::{Priority, Task, TaskId, PROGRESS_COMPLETE};

/// Which ids a bulk operation touched and which it could not find.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkOutcome {
    /// Ids updated, in roster order.
    pub updated: Vec<TaskId>,
    /// Requested ids that matched no task, ascending.
    pub missing: Vec<TaskId>,
}

impl TeamStore {
    /// Sets the priority of every task whose id is in `task_ids`.
    pub fn bulk_update_priority(
        &mut self,
        task_ids: impl IntoIterator<Item = TaskId>,
        priority: Priority,
    ) -> BulkOutcome {
        let outcome = self.for_each_task(task_ids, |task| task.priority = priority);
        info!(
            %priority,
            updated = outcome.updated.len(),
            missing = outcome.missing.len(),
            "bulk priority update"
        );
        outcome
    }

    /// Completes every task whose id is in `task_ids`.
    pub fn bulk_complete(&mut self, task_ids: impl IntoIterator<Item = TaskId>) -> BulkOutcome {
        let outcome =
            self.for_each_task(task_ids, |task| task.set_progress(i64::from(PROGRESS_COMPLETE)));
        info!(
            updated = outcome.updated.len(),
            missing = outcome.missing.len(),
            "bulk complete"
        );
        outcome
    }

    fn for_each_task(
        &mut self,
        task_ids: impl IntoIterator<Item = TaskId>,
        mut apply: impl FnMut(&mut Task),
    ) -> BulkOutcome {
        let mut pending: BTreeSet<TaskId> = task_ids.into_iter().collect();
        let mut updated = Vec::new();
        for task in self.members.iter_mut().flat_map(|m| m.tasks.iter_mut()) {
            if pending.remove(&task.id) {
                apply(task);
                updated.push(task.id);
            }
        }
        BulkOutcome { updated, missing: pending.into_iter().collect() }
    }
}
