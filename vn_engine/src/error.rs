//! Engine error types.

use thiserror::Error;
use vn_state::StoreError;

use crate::config::ConfigError;

/// Errors surfaced by engine operations.
///
/// Invalid player input is never an error; prompts either fall back to a
/// default or ask again.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An accepted answer could not be saved. Fatal for the session.
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended while the engine was waiting for a line.
    #[error("input closed")]
    InputClosed,

    #[error("choice prompt `{key}` has no options")]
    NoOptions { key: String },

    #[error("default `{default}` is not an option of choice prompt `{key}`")]
    UnknownDefault { key: String, default: String },

    /// Days are numbered from 1.
    #[error("day {day} is not a valid day")]
    InvalidDay { day: u32 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
