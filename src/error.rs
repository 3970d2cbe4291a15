use std::path::PathBuf;

use thiserror::Error;

/// Error taxonomy for the search engine.
///
/// `Input` aborts a corpus load (the corpus cannot be partially trusted),
/// `State` and `Validation` abort only the offending call, and
/// `NotFound`/`Corrupt` on restore are expected to make the caller fall back
/// to a fresh build.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    Input(String),

    #[error("invalid state: {0}")]
    State(String),

    #[error("invalid argument: {0}")]
    Validation(String),

    #[error("snapshot not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("snapshot is corrupt: {0}")]
    Corrupt(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
