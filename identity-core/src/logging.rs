//! Logging Infrastructure
//!
//! Structured logging setup shared by every binary embedding the core.
//! The level comes from `RUST_LOG` when set, defaulting to `info`.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize structured logging, optionally rolling output into a daily
/// file under `log_dir` (falls back to stderr when the directory is
/// missing).
pub fn init_logger(log_dir: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if let Some(dir) = log_dir
        && dir.exists()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "identity-core");
        subscriber.with_writer(file_appender).init();
        return;
    }

    subscriber.init();
}
