//! Error types for the I/O edges
//!
//! The simulation itself never fails; only configuration loading and
//! high score storage can.

use thiserror::Error;

/// Failure loading or validating [`crate::Tuning`] / [`crate::Settings`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid JSON for the target type
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its usable range
    #[error("{name} = {value} is out of range (expected {expected})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Failure reading or writing the high score slot
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("high score storage i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt high score data: {0}")]
    Parse(#[from] serde_json::Error),
    /// Backing storage does not exist in this environment
    #[error("high score storage unavailable: {0}")]
    Unavailable(&'static str),
}
