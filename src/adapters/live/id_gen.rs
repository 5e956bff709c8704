//! Live adapter for the `IdGenerator` port.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::ports::IdGenerator;

/// Hands out ids from an atomic counter, starting at 1.
///
/// `u64::MAX` is never issued; the counter parks there once the space is used up.
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next: AtomicU64::new(1) }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_id(&self) -> Option<u64> {
        self.next.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |next| next.checked_add(1)).ok()
    }

    fn observe(&self, id: u64) {
        self.next.fetch_max(id.saturating_add(1), Ordering::SeqCst);
    }
}
