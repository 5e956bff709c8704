//! Live adapters backed by the system.

pub mod clock;
pub mod id_gen;

pub use clock::SystemClock;
pub use id_gen::SequentialIdGenerator;
