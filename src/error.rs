use std::path::PathBuf;

use crate::game::MAX_DIMENSION;

/// Errors that can occur when starting a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("invalid board dimensions {rows}x{columns} (each must be 1..={max})", max = MAX_DIMENSION)]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("both players chose the color {0}; please choose different colors")]
    DuplicatePlayerColors(String),

    #[error("invalid color '{0}' (expected #rrggbb)")]
    InvalidColor(String),
}

/// Errors that can occur when dropping a piece.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the round is over; reset to play again")]
    RoundOver,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid setup defaults: {0}")]
    Setup(#[from] SetupError),
}

/// Errors that can occur when installing the log subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unknown log level '{0}'")]
    InvalidLevel(String),

    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInitialised(#[from] tracing::subscriber::SetGlobalDefaultError),
}
