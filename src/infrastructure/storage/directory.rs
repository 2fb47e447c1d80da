//! Directory file saver adapter
//!
//! Plays the part of a browser download: each export lands in one
//! directory, and a name that is already taken gets a ` (n)` suffix.
//! Concurrent saves of one name each end up in their own file.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::{Builder, NamedTempFile};
use tokio::fs;
use tracing::debug;

use crate::application::ports::{FileSaver, SaveError};

/// Upper bound on ` (n)` suffixes tried for one name
const MAX_DUPLICATES: u32 = 999;

/// Saves exports into a fixed directory
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn validate_name(filename: &str) -> Result<(), SaveError> {
        let invalid = filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains(['/', '\\', '\0']);
        if invalid {
            return Err(SaveError::InvalidName(filename.to_string()));
        }
        Ok(())
    }

    /// `name.ext` becomes `name (n).ext`
    fn numbered(filename: &str, n: u32) -> String {
        match filename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => format!("{} ({}).{}", stem, n, ext),
            _ => format!("{} ({})", filename, n),
        }
    }

    fn write_failed(path: &Path, err: impl ToString) -> SaveError {
        SaveError::WriteFailed {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Write `bytes` to a private staging file in `dir` (blocking)
    fn stage(dir: &Path, bytes: &[u8]) -> Result<NamedTempFile, SaveError> {
        let mut staged = Builder::new()
            .prefix(".export-")
            .suffix(".part")
            .tempfile_in(dir)
            .map_err(|e| Self::write_failed(dir, e))?;
        staged
            .write_all(bytes)
            .and_then(|()| staged.flush())
            .map_err(|e| Self::write_failed(staged.path(), e))?;
        Ok(staged)
    }

    /// Move the staged file to the first free name (blocking).
    ///
    /// Each attempt fails with `AlreadyExists` instead of replacing a
    /// file, so two saves can never claim the same name.
    fn claim(dir: &Path, filename: &str, mut staged: NamedTempFile) -> Result<PathBuf, SaveError> {
        let candidates = std::iter::once(filename.to_string())
            .chain((1..=MAX_DUPLICATES).map(|n| Self::numbered(filename, n)));

        for name in candidates {
            let target = dir.join(name);
            match staged.persist_noclobber(&target) {
                Ok(_) => return Ok(target),
                Err(e) if e.error.kind() == ErrorKind::AlreadyExists => staged = e.file,
                Err(e) => return Err(Self::write_failed(&target, e.error)),
            }
        }

        // Dropping the staged file removes it
        Err(Self::write_failed(
            &dir.join(filename),
            "too many files with this name",
        ))
    }
}

#[async_trait]
impl FileSaver for DirectorySaver {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, SaveError> {
        Self::validate_name(filename)?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Self::write_failed(&self.dir, e))?;

        let dir = self.dir.clone();
        let name = filename.to_string();
        let bytes = bytes.to_vec();
        let size = bytes.len();

        let target = tokio::task::spawn_blocking(move || {
            let staged = Self::stage(&dir, &bytes)?;
            Self::claim(&dir, &name, staged)
        })
        .await
        .map_err(|e| Self::write_failed(&self.dir.join(filename), e))??;

        debug!(path = %target.display(), bytes = size, "file saved");
        Ok(target)
    }
}
