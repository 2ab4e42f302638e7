// dualtrack_core/src/error.rs

use thiserror::Error;

/// Errors raised while validating odometry configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a positive, finite number (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("odometry update period must be greater than zero")]
    ZeroPeriod,
}

/// Errors raised by the periodic odometry task.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("invalid task configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to spawn odometry thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("odometry thread panicked")]
    Panicked,

    #[error("odometry task is no longer running")]
    Stopped,
}
