//! Domain types for the team roster.
//!
//! Members own their tasks, tasks own their comments; nothing is shared and
//! there are no back-references. These types are serialized for seed data and
//! snapshots, and mutated only through [`crate::store::TeamStore`].

mod filter;
mod label;
mod member;
mod task;

pub use filter::{Filter, Filters};
pub use label::{Category, ParseLabelError, Priority, Status};
pub use member::Member;
pub use task::{normalize_tag, Comment, Task, MAX_TAGS, MAX_TITLE_CHARS, PROGRESS_COMPLETE};

/// Stable identifier of a team member.
pub type MemberId = u64;

/// Identifier of a task, unique across every member.
pub type TaskId = u64;

/// Identifier of a comment, unique across every task.
pub type CommentId = u64;
