//! Adapters that serve pinned values instead of live ones.

pub mod clock;

pub use clock::FixedClock;
