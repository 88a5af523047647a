//! Log sink setup
//!
//! Events always go to a JSON-lines file. They are mirrored to the console
//! unless `logging.console` is off (see `BOOKMARKS_ENV=production`).

use crate::config::LoggingConfig;
use crate::error::{CoreError, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Boxed subscriber assembled from `LoggingConfig`
pub type BoxedSubscriber = Box<dyn tracing::Subscriber + Send + Sync>;

/// Install the global subscriber.
///
/// The returned guard flushes the file sink when dropped, so the caller
/// keeps it alive for the lifetime of the process.
pub fn init(config: &LoggingConfig, log_file: &Path, verbose: bool) -> Result<WorkerGuard> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into());

    let (subscriber, guard) = build_subscriber(config, log_file, filter)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CoreError::Config(format!("Failed to install logger: {}", e)))?;
    Ok(guard)
}

/// Build the file sink and, if enabled, the console sink without installing them
pub fn build_subscriber(
    config: &LoggingConfig,
    log_file: &Path,
    filter: EnvFilter,
) -> Result<(BoxedSubscriber, WorkerGuard)> {
    let (directory, file_name) = split_log_path(log_file)?;
    std::fs::create_dir_all(&directory)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(&directory)
        .map_err(|e| CoreError::Config(format!("Failed to open log file: {}", e)))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(writer);

    let console_layer = config.console.then(tracing_subscriber::fmt::layer);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer);

    Ok((Box::new(subscriber), guard))
}

fn default_filter(level: &str) -> String {
    format!("bookmarks={},tower_http=info", level)
}

/// Split a log path into its directory and file name
fn split_log_path(path: &Path) -> Result<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CoreError::Config(format!("Invalid log file path: {}", path.display())))?
        .to_string();

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((directory, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_bare_file_name() {
        let (dir, name) = split_log_path(Path::new("info.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "info.log");
    }

    #[test]
    fn test_split_nested_path() {
        let (dir, name) = split_log_path(Path::new("/var/log/bookmarks/info.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log/bookmarks"));
        assert_eq!(name, "info.log");
    }

    #[test]
    fn test_split_rejects_directory_only() {
        assert!(split_log_path(Path::new("/")).is_err());
    }

    #[test]
    fn test_file_sink_writes_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("logs").join("info.log");
        let config = LoggingConfig {
            console: false,
            ..Default::default()
        };

        let filter = EnvFilter::new(default_filter("info"));
        let (subscriber, guard) = build_subscriber(&config, &log_file, filter).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Bookmark with id abc created");
            tracing::debug!("below the configured level");
        });
        // Dropping the guard flushes the non-blocking writer
        drop(guard);

        let content = std::fs::read_to_string(&log_file).unwrap();
        let events: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["level"], "INFO");
        assert_eq!(events[0]["fields"]["message"], "Bookmark with id abc created");
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("warn"), "bookmarks=warn,tower_http=info");
    }
}
