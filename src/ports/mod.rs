//! Port traits defining external boundaries.
//!
//! The store never reads the system clock or invents ids on its own; both
//! come through these traits so tests can pin time and predict ids.
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod id_gen;

pub use clock::Clock;
pub use id_gen::IdGenerator;
