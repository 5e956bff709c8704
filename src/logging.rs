//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber filtered by `filter`.
///
/// An invalid directive falls back to [`crate::config::DEFAULT_LOG_FILTER`].
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_new(filter)
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::init;

    #[test]
    fn init_is_idempotent() {
        init("teampulse=debug");
        init("not a [valid filter");
    }
}
