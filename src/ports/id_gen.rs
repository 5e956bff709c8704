//! ID generator port for allocating task and comment identifiers.

/// Allocates unique, strictly increasing numeric identifiers.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier, greater than every id handed out or observed so far.
    ///
    /// Returns `None` once the id space is exhausted; an id is never reissued.
    fn generate_id(&self) -> Option<u64>;

    /// Records an id allocated elsewhere (e.g. seed data) so it is never reissued.
    fn observe(&self, id: u64);
}
