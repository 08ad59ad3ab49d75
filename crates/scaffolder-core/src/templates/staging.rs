//! Ownership of the temporary directory a template package is downloaded into

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A staging directory that is removed exactly once
///
/// Call [`StagingDir::remove`] to remove it and observe the result. If the
/// value is dropped without that (an early return or a panic), the directory is
/// removed on drop and any failure is only logged.
#[derive(Debug)]
pub struct StagingDir {
    path: PathBuf,
    armed: bool,
}

impl StagingDir {
    /// Create the directory and any missing parents; an existing directory is reused
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path)?;
        tracing::debug!(path = %path.display(), "created staging directory");
        Ok(Self { path, armed: true })
    }

    /// Location of the staging directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory and everything in it
    pub fn remove(mut self) -> io::Result<()> {
        self.armed = false;
        remove_dir_if_exists(&self.path)
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(err) = remove_dir_if_exists(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to remove staging directory");
        }
    }
}

/// Recursively remove `path`; a path that does not exist is not an error
pub fn remove_dir_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        result => {
            if result.is_ok() {
                tracing::debug!(path = %path.display(), "removed staging directory");
            }
            result
        }
    }
}
