//! Service context bundling the port trait objects the store depends on.

use chrono::{DateTime, Utc};

use crate::adapters::fixed::FixedClock;
use crate::adapters::live::{SequentialIdGenerator, SystemClock};
use crate::ports::clock::Clock;
use crate::ports::id_gen::IdGenerator;

/// Bundles the store's external boundaries.
///
/// Task ids and comment ids come from separate generators so each sequence
/// stays dense and monotonic on its own.
pub struct ServiceContext {
    /// Clock for timestamps and due-date checks.
    pub clock: Box<dyn Clock>,
    /// Allocates task ids.
    pub task_ids: Box<dyn IdGenerator>,
    /// Allocates comment ids.
    pub comment_ids: Box<dyn IdGenerator>,
}

impl ServiceContext {
    /// Creates a context on the system clock with fresh id sequences.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(SystemClock),
            task_ids: Box::new(SequentialIdGenerator::new()),
            comment_ids: Box::new(SequentialIdGenerator::new()),
        }
    }

    /// Creates a context whose clock is pinned at `now`.
    #[must_use]
    pub fn fixed(now: DateTime<Utc>) -> Self {
        Self { clock: Box::new(FixedClock::new(now)), ..Self::live() }
    }
}

impl Default for ServiceContext {
    fn default() -> Self {
        Self::live()
    }
}
