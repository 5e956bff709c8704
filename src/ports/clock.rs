//! Clock port for obtaining the current time.

use chrono::{DateTime, NaiveDate, Utc};

/// Provides the current time.
///
/// Abstracting time access allows deterministic tests by substituting
/// a fixed clock for the system one.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current UTC calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
