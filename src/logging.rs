//! File-backed `tracing` setup. The terminal belongs to the UI, so events
//! are written to a daily-rolled log file instead of stderr.

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

use crate::config::LoggingConfig;
use crate::error::LoggingError;

/// Install the global subscriber. Keep the returned guard alive until exit or
/// buffered events are lost.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard, LoggingError> {
    let level = parse_level(&config.level)?;
    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(non_blocking)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(log_dir = %config.directory.display(), %level, "logging initialised");
    Ok(guard)
}

fn parse_level(level: &str) -> Result<Level, LoggingError> {
    level
        .parse()
        .map_err(|_| LoggingError::InvalidLevel(level.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_level("WARN").unwrap(), Level::WARN);
        assert!(parse_level("chatty").is_err());
    }

    #[test]
    fn test_second_init_reports_existing_subscriber() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            directory: dir.path().to_path_buf(),
            ..LoggingConfig::default()
        };

        // Only this test installs a subscriber, so the first call owns it
        let _guard = init(&config).unwrap();
        assert!(matches!(
            init(&config),
            Err(LoggingError::AlreadyInitialised(_))
        ));
    }

    #[test]
    fn test_init_rejects_unknown_level() {
        let config = LoggingConfig {
            level: "chatty".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(init(&config), Err(LoggingError::InvalidLevel(_))));
    }
}
