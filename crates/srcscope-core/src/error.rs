//! Error types for srcscope.

use std::path::PathBuf;
use thiserror::Error;

/// srcscope error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid exclude pattern: {0}")]
    Pattern(String),

    #[error("Project descriptor does not exist: {}", .0.display())]
    ProjectDescriptorMissing(PathBuf),

    #[error("Project load error: {0}")]
    ProjectLoad(String),

    #[error("Watcher error: {0}")]
    Watcher(String),
}

/// Result type alias for srcscope operations.
pub type Result<T> = std::result::Result<T, Error>;
