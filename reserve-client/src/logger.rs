//! Logging Infrastructure
//!
//! Human-readable output on stderr, or daily rolling JSON files when a log
//! directory is configured. `RUST_LOG` overrides the configured level. A log
//! directory that cannot be created falls back to stderr with a warning.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize the logger
///
/// Keep the returned guard alive for the life of the process, file output is
/// flushed when it drops.
pub fn init_logger(log_level: &str, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let mut unavailable = None;
    if let Some(dir) = log_dir {
        match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(dir, "reserve-client");
                let (writer, guard) = tracing_appender::non_blocking(file_appender);
                // an already installed subscriber stays in place
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .try_init()
                    .ok();
                return Some(guard);
            }
            Err(e) => unavailable = Some((dir, e)),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
    if let Some((dir, error)) = unavailable {
        tracing::warn!(dir, error = %error, "Log directory unavailable, logging to stderr");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unusable_log_dir_falls_back_to_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        let log_dir = blocker.join("logs");

        let guard = init_logger("warn", log_dir.to_str());
        assert!(guard.is_none());
        assert!(!log_dir.exists());
    }
}
