//! Adapter implementations of the port traits.
//!
//! `live` talks to the real system; `fixed` pins values for deterministic runs.

pub mod fixed;
pub mod live;
