//! Error types for the I/O edges of the crate
//!
//! The simulation itself never fails: out-of-state inputs are ignored.
//! Only configuration loading and score persistence report errors.

use std::io;

use thiserror::Error;

/// Configuration could not be loaded or is unusable
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Score store failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("corrupt score data: {0}")]
    Parse(#[from] serde_json::Error),
}
