//! File saving port interface

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// Saving errors
#[derive(Debug, Clone, Error)]
pub enum SaveError {
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: String, message: String },
}

/// Port for handing a finished export to the user
#[async_trait]
pub trait FileSaver: Send + Sync {
    /// Save `bytes` under `filename`.
    ///
    /// Either the whole file appears or nothing does.
    ///
    /// # Returns
    /// Where the file ended up
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, SaveError>;
}
