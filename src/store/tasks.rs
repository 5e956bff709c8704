//! Task-level operations.

use tracing::{debug, info};

use super::TeamStore;
use crate::draft::TaskDraft;
use crate::error::{Missing, Result, StoreError};
use crate::model::{
    Category, Comment, CommentId, MemberId, Priority, TaskId, PROGRESS_COMPLETE,
};

impl TeamStore {
    /// Validates `draft` and appends the resulting task to the member's list.
    ///
    /// The new task gets a fresh id, zero progress, zero booked hours, no
    /// comments, and `assigned_at` set to now.
    ///
    /// # Errors
    ///
    /// Returns `Validation` listing every bad field, `NotFound` if the member
    /// does not exist, or `IdsExhausted` when no task id is left. Nothing is
    /// appended in any case.
    pub fn assign_task(&mut self, member_id: MemberId, draft: &TaskDraft) -> Result<TaskId> {
        let valid = draft.validate(self.ctx.clock.today())?;
        if self.member(member_id).is_none() {
            return Err(StoreError::NotFound(Missing::Member(member_id)));
        }

        let id = self.ctx.task_ids.generate_id().ok_or(StoreError::IdsExhausted("task"))?;
        let task = valid.into_task(id, self.ctx.clock.now());
        info!(member_id, task_id = id, title = %task.title, "task assigned");
        self.member_mut(member_id)?.tasks.push(task);
        Ok(id)
    }

    /// Sets a task's progress, clamped to 0..=100.
    ///
    /// Reaching 100 completes the task; anything lower re-opens it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the member or task does not exist.
    pub fn set_task_progress(
        &mut self,
        member_id: MemberId,
        task_id: TaskId,
        progress: i64,
    ) -> Result<()> {
        let task = self.task_mut(member_id, task_id)?;
        task.set_progress(progress);
        debug!(
            member_id,
            task_id,
            progress = task.progress,
            completed = task.completed,
            "progress set"
        );
        Ok(())
    }

    /// Marks a task complete (progress 100). Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the member or task does not exist.
    pub fn complete_task(&mut self, member_id: MemberId, task_id: TaskId) -> Result<()> {
        self.set_task_progress(member_id, task_id, i64::from(PROGRESS_COMPLETE))
    }

    /// Re-opens a task at `progress` (clamped to 0..=99). Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the member or task does not exist.
    pub fn reopen_task(
        &mut self,
        member_id: MemberId,
        task_id: TaskId,
        progress: i64,
    ) -> Result<()> {
        let below_done = i64::from(PROGRESS_COMPLETE) - 1;
        self.set_task_progress(member_id, task_id, progress.min(below_done))
    }

    /// Changes a task's priority.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the member or task does not exist.
    pub fn set_task_priority(
        &mut self,
        member_id: MemberId,
        task_id: TaskId,
        priority: Priority,
    ) -> Result<()> {
        self.task_mut(member_id, task_id)?.priority = priority;
        debug!(member_id, task_id, %priority, "priority set");
        Ok(())
    }

    /// Changes a task's category.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the member or task does not exist.
    pub fn set_task_category(
        &mut self,
        member_id: MemberId,
        task_id: TaskId,
        category: Category,
    ) -> Result<()> {
        self.task_mut(member_id, task_id)?.category = category;
        debug!(member_id, task_id, %category, "category set");
        Ok(())
    }

    /// Records hours booked on a task; negative values are clamped to zero.
    ///
    /// # Errors
    ///
    /// Returns `Range` for a non-finite value, or `NotFound` if the member or
    /// task does not exist.
    pub fn set_task_hours(
        &mut self,
        member_id: MemberId,
        task_id: TaskId,
        actual_hours: f64,
    ) -> Result<()> {
        if !actual_hours.is_finite() {
            return Err(StoreError::Range { field: "actual_hours", value: actual_hours });
        }
        let task = self.task_mut(member_id, task_id)?;
        task.actual_hours = actual_hours.max(0.0);
        debug!(member_id, task_id, actual_hours = task.actual_hours, "hours set");
        Ok(())
    }

    /// Adds a normalized tag. Returns whether the tag set changed.
    ///
    /// Blank tags, tags already present, and tags beyond the limit of ten
    /// leave the task unchanged.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the member or task does not exist.
    pub fn add_tag(&mut self, member_id: MemberId, task_id: TaskId, tag: &str) -> Result<bool> {
        let added = self.task_mut(member_id, task_id)?.add_tag(tag);
        debug!(member_id, task_id, tag, added, "add tag");
        Ok(added)
    }

    /// Removes a tag, compared after normalization. Returns whether it was present.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the member or task does not exist.
    pub fn remove_tag(&mut self, member_id: MemberId, task_id: TaskId, tag: &str) -> Result<bool> {
        let removed = self.task_mut(member_id, task_id)?.remove_tag(tag);
        debug!(member_id, task_id, tag, removed, "remove tag");
        Ok(removed)
    }

    /// Appends a comment stamped with a fresh id and the current time.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the member or task does not exist, or
    /// `IdsExhausted` when no comment id is left.
    pub fn add_comment(
        &mut self,
        member_id: MemberId,
        task_id: TaskId,
        author: &str,
        message: &str,
    ) -> Result<CommentId> {
        // Resolve first so a miss does not burn a comment id.
        self.task_mut(member_id, task_id)?;
        let comment = Comment {
            id: self.ctx.comment_ids.generate_id().ok_or(StoreError::IdsExhausted("comment"))?,
            author: author.to_string(),
            message: message.to_string(),
            timestamp: self.ctx.clock.now(),
        };
        let id = comment.id;
        self.task_mut(member_id, task_id)?.comments.push(comment);
        debug!(member_id, task_id, comment_id = id, "comment added");
        Ok(id)
    }

    /// Removes a task from its member's list.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the member or task does not exist.
    pub fn delete_task(&mut self, member_id: MemberId, task_id: TaskId) -> Result<()> {
        let member = self.member_mut(member_id)?;
        let before = member.tasks.len();
        member.tasks.retain(|t| t.id != task_id);
        if member.tasks.len() == before {
            debug!(member_id, task_id, "task not found; operation ignored");
            return Err(StoreError::NotFound(Missing::Task { member_id, task_id }));
        }
        info!(member_id, task_id, "task deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::super::test_support::{seed_now, seeded_store};
    use super::TeamStore;
    use crate::context::ServiceContext;
    use crate::draft::TaskDraft;
    use crate::error::{Field, Missing, StoreError};
    use crate::model::{Category, Priority};

    fn draft() -> TaskDraft {
        TaskDraft::new("Prepare sprint demo", NaiveDate::from_ymd_opt(2025, 1, 31).unwrap())
    }

    #[test]
    fn assign_appends_fresh_task() {
        let (mut store, _) = seeded_store();
        let id = store.assign_task(2, &draft()).unwrap();

        assert_eq!(id, 8);
        let member = store.member(2).unwrap();
        let task = member.tasks.last().unwrap();
        assert_eq!(task.id, 8);
        assert_eq!(task.progress, 0);
        assert!(!task.completed);
        assert!(task.actual_hours.abs() < f64::EPSILON);
        assert!(task.comments.is_empty());
        assert_eq!(task.assigned_at, seed_now());
        assert_eq!(member.tasks.len(), 2);
    }

    #[test]
    fn assigned_ids_keep_increasing() {
        let (mut store, _) = seeded_store();
        let a = store.assign_task(1, &draft()).unwrap();
        let b = store.assign_task(5, &draft()).unwrap();
        assert!(b > a);
    }

    #[test]
    fn assign_rejects_invalid_draft_without_appending() {
        let (mut store, _) = seeded_store();
        let before = store.snapshot();
        let bad = TaskDraft {
            estimated_hours: 0.0,
            ..TaskDraft::new("x", NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        };

        let err = store.assign_task(1, &bad).unwrap_err();

        let StoreError::Validation(err) = err else { panic!("expected validation error") };
        assert_eq!(err.fields(), vec![Field::DueDate, Field::EstimatedHours]);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn assign_to_unknown_member_is_not_found() {
        let (mut store, _) = seeded_store();
        let err = store.assign_task(99, &draft()).unwrap_err();
        assert_eq!(err, StoreError::NotFound(Missing::Member(99)));
        assert_eq!(store.members().iter().map(|m| m.tasks.len()).sum::<usize>(), 7);
    }

    #[test]
    fn due_date_is_judged_against_the_clock() {
        let (mut store, clock) = seeded_store();
        clock.advance(Duration::days(30));
        let err = store.assign_task(1, &draft()).unwrap_err();
        assert!(matches!(err, StoreError::Validation(e) if e.has(Field::DueDate)));
    }

    #[test]
    fn exhausted_task_ids_fail_instead_of_wrapping() {
        let mut members = crate::seed::built_in().unwrap();
        members[4].tasks[0].id = u64::MAX;
        let ctx = ServiceContext::fixed(seed_now());
        let mut store = TeamStore::try_new(ctx, members).unwrap();
        let before = store.snapshot();

        let err = store.assign_task(5, &draft()).unwrap_err();

        assert_eq!(err, StoreError::IdsExhausted("task"));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn exhausted_comment_ids_fail_instead_of_wrapping() {
        let mut members = crate::seed::built_in().unwrap();
        members[0].tasks[0].comments[0].id = u64::MAX;
        let mut store = TeamStore::try_new(ServiceContext::fixed(seed_now()), members).unwrap();

        let err = store.add_comment(1, 1, "John Doe", "One more").unwrap_err();

        assert_eq!(err, StoreError::IdsExhausted("comment"));
        assert_eq!(store.task(1, 1).unwrap().comments.len(), 1);
    }

    #[test]
    fn progress_round_trip_reopens() {
        let (mut store, _) = seeded_store();
        store.set_task_progress(1, 1, 100).unwrap();
        assert!(store.task(1, 1).unwrap().completed);

        store.set_task_progress(1, 1, 50).unwrap();
        let task = store.task(1, 1).unwrap();
        assert_eq!(task.progress, 50);
        assert!(!task.completed);
    }

    #[test]
    fn progress_is_clamped() {
        let (mut store, _) = seeded_store();
        store.set_task_progress(1, 1, 180).unwrap();
        assert_eq!(store.task(1, 1).unwrap().progress, 100);
        assert!(store.task(1, 1).unwrap().completed);

        store.set_task_progress(1, 1, -20).unwrap();
        assert_eq!(store.task(1, 1).unwrap().progress, 0);
    }

    #[test]
    fn complete_and_reopen_are_idempotent() {
        let (mut store, _) = seeded_store();
        store.complete_task(3, 4).unwrap();
        store.complete_task(3, 4).unwrap();
        assert_eq!(store.task(3, 4).unwrap().progress, 100);

        store.reopen_task(3, 4, 100).unwrap();
        store.reopen_task(3, 4, 100).unwrap();
        let task = store.task(3, 4).unwrap();
        assert_eq!(task.progress, 99);
        assert!(!task.completed);
    }

    #[test]
    fn task_lookup_misses_are_reported_and_harmless() {
        let (mut store, _) = seeded_store();
        let before = store.snapshot();

        assert_eq!(
            store.set_task_progress(1, 3, 10).unwrap_err(),
            StoreError::NotFound(Missing::Task { member_id: 1, task_id: 3 })
        );
        assert!(store.set_task_priority(9, 1, Priority::Low).unwrap_err().is_not_found());
        assert!(store.set_task_category(1, 99, Category::Design).unwrap_err().is_not_found());
        assert!(store.delete_task(1, 99).unwrap_err().is_not_found());
        assert!(store.add_comment(1, 99, "a", "b").unwrap_err().is_not_found());

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn single_field_updates() {
        let (mut store, _) = seeded_store();
        store.set_task_priority(3, 5, Priority::High).unwrap();
        store.set_task_category(3, 5, Category::Security).unwrap();
        let task = store.task(3, 5).unwrap();
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.category, Category::Security);
        assert_eq!(task.progress, 20);
    }

    #[test]
    fn hours_are_clamped_and_non_finite_rejected() {
        let (mut store, _) = seeded_store();
        store.set_task_hours(1, 1, -4.0).unwrap();
        assert!(store.task(1, 1).unwrap().actual_hours.abs() < f64::EPSILON);

        store.set_task_hours(1, 1, 6.25).unwrap();
        assert!((store.task(1, 1).unwrap().actual_hours - 6.25).abs() < f64::EPSILON);

        let err = store.set_task_hours(1, 1, f64::NAN).unwrap_err();
        assert!(matches!(err, StoreError::Range { field: "actual_hours", .. }));
        assert!((store.task(1, 1).unwrap().actual_hours - 6.25).abs() < f64::EPSILON);
    }

    #[test]
    fn tags_normalize_and_stay_unique() {
        let (mut store, _) = seeded_store();
        assert!(store.add_tag(1, 1, " OAuth ").unwrap());
        assert!(!store.add_tag(1, 1, "oauth").unwrap());
        assert_eq!(store.task(1, 1).unwrap().tags.len(), 4);

        assert!(store.remove_tag(1, 1, "OAUTH").unwrap());
        assert!(!store.remove_tag(1, 1, "oauth").unwrap());
        assert_eq!(store.task(1, 1).unwrap().tags.len(), 3);
    }

    #[test]
    fn comments_append_in_order_with_fresh_ids() {
        let (mut store, clock) = seeded_store();
        let first = store.add_comment(1, 1, "Sarah Wilson", "Looks good").unwrap();
        clock.advance(Duration::minutes(5));
        let second = store.add_comment(1, 1, "John Doe", "Thanks").unwrap();

        assert_eq!(first, 4);
        assert_eq!(second, 5);
        let comments = &store.task(1, 1).unwrap().comments;
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[1].message, "Looks good");
        assert_eq!(comments[2].author, "John Doe");
        assert!(comments[2].timestamp > comments[1].timestamp);
    }

    #[test]
    fn delete_removes_only_that_task() {
        let (mut store, _) = seeded_store();
        store.delete_task(3, 4).unwrap();
        let ids: Vec<_> = store.member(3).unwrap().tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![5]);
    }
}
