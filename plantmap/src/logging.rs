//! Logging setup.
//!
//! Every session writes to a fresh `plantmap.log` in the log directory and,
//! optionally, to stderr so command output on stdout stays clean. The level
//! defaults to `info` and follows `RUST_LOG` when set.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the background log writer alive. Dropping it flushes the file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
    path: PathBuf,
}

impl LoggingGuard {
    /// Path of the log file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Create `log_dir` if needed and truncate `log_file` inside it.
pub fn prepare_log_file(log_dir: &Path, log_file: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(log_file);
    fs::write(&path, "")?;
    Ok(path)
}

/// Install the global subscriber.
///
/// Can only succeed once per process; later calls leave the first
/// subscriber in place.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be prepared.
pub fn init_logging(
    log_dir: &Path,
    log_file: &str,
    console: bool,
) -> Result<LoggingGuard, io::Error> {
    let path = prepare_log_file(log_dir, log_file)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let console_layer = console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .compact()
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Fails only if a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
        path,
    })
}

/// Default log file name.
pub fn default_log_file() -> &'static str {
    "plantmap.log"
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        assert_eq!(default_log_file(), "plantmap.log");
    }

    #[test]
    fn test_prepare_creates_nested_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("deep").join("logs");

        let path = prepare_log_file(&dir, "plantmap.log").unwrap();
        assert!(dir.exists());
        assert_eq!(path, dir.join("plantmap.log"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_prepare_truncates_previous_session() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plantmap.log");
        fs::write(&path, "old session").unwrap();

        prepare_log_file(temp.path(), "plantmap.log").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_prepare_fails_when_directory_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("logs");
        fs::write(&blocker, "not a directory").unwrap();

        assert!(prepare_log_file(&blocker, "plantmap.log").is_err());
    }
}
