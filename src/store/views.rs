//! Derived views, recomputed from current state on every call.

use std::collections::BTreeMap;

use serde::Serialize;

use super::TeamStore;
use crate::error::{Missing, Result, StoreError};
use crate::model::{Member, MemberId, Status, Task};

/// Open work held by one member.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Workload {
    /// Tasks not yet completed.
    pub active_tasks: usize,
    /// Sum of estimated hours over those tasks.
    pub total_hours: f64,
}

impl Workload {
    /// Computes the workload of `member`.
    #[must_use]
    pub fn of(member: &Member) -> Self {
        member.active_tasks().fold(Self { active_tasks: 0, total_hours: 0.0 }, |acc, task| Self {
            active_tasks: acc.active_tasks + 1,
            total_hours: acc.total_hours + task.estimated_hours,
        })
    }
}

/// Team-wide headline numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamSummary {
    /// Roster size.
    pub members: usize,
    /// Members working or in a meeting.
    pub active_members: usize,
    /// Tasks across every member.
    pub total_tasks: usize,
    /// Completed tasks.
    pub completed_tasks: usize,
    /// Tasks still open.
    pub active_tasks: usize,
    /// Completed share as a rounded percentage; 0 with no tasks.
    pub completion_rate: u32,
    /// Open tasks past their due date.
    pub overdue_tasks: usize,
}

/// Stable sort, most active tasks first; ties keep their input order.
#[must_use]
pub fn sorted_by_workload(mut members: Vec<&Member>) -> Vec<&Member> {
    members.sort_by(|a, b| b.active_task_count().cmp(&a.active_task_count()));
    members
}

impl TeamStore {
    /// Number of members in each status. Every status is present, zero included.
    #[must_use]
    pub fn status_counts(&self) -> BTreeMap<Status, usize> {
        let mut counts: BTreeMap<Status, usize> = Status::ALL.iter().map(|s| (*s, 0)).collect();
        for member in &self.members {
            *counts.entry(member.status).or_default() += 1;
        }
        counts
    }

    /// Members that are working or in a meeting.
    #[must_use]
    pub fn active_members_count(&self) -> usize {
        self.members.iter().filter(|m| m.status.is_active()).count()
    }

    /// Open work of one member.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no member has `member_id`.
    pub fn workload(&self, member_id: MemberId) -> Result<Workload> {
        self.member(member_id)
            .map(Workload::of)
            .ok_or(StoreError::NotFound(Missing::Member(member_id)))
    }

    /// Members passing the status filter, in roster order.
    #[must_use]
    pub fn filtered_members(&self) -> Vec<&Member> {
        self.members.iter().filter(|m| self.filters.status.matches(&m.status)).collect()
    }

    /// Tasks passing the priority and category filters, with their owner's id.
    #[must_use]
    pub fn filtered_tasks(&self) -> Vec<(MemberId, &Task)> {
        self.members
            .iter()
            .flat_map(|m| m.tasks.iter().map(move |t| (m.id, t)))
            .filter(|(_, t)| {
                self.filters.priority.matches(&t.priority)
                    && self.filters.category.matches(&t.category)
            })
            .collect()
    }

    /// Headline numbers for the whole team, judged against the clock's today.
    #[must_use]
    pub fn team_summary(&self) -> TeamSummary {
        let today = self.ctx.clock.today();
        let tasks = || self.members.iter().flat_map(|m| &m.tasks);
        let total_tasks = tasks().count();
        let completed_tasks = tasks().filter(|t| t.completed).count();
        let completion_rate = if total_tasks == 0 {
            0
        } else {
            let rate = (completed_tasks * 100 + total_tasks / 2) / total_tasks;
            u32::try_from(rate).unwrap_or(100)
        };
        TeamSummary {
            members: self.members.len(),
            active_members: self.active_members_count(),
            total_tasks,
            completed_tasks,
            active_tasks: total_tasks - completed_tasks,
            completion_rate,
            overdue_tasks: tasks().filter(|t| t.is_overdue(today)).count(),
        }
    }
}
