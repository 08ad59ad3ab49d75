//! Template tree copying with name-based exclusion

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use same_file::is_same_file;
use thiserror::Error;
use walkdir::WalkDir;

/// Names skipped during a copy, matched against a single path component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyOptions {
    exclude_dirs: HashSet<OsString>,
}

impl CopyOptions {
    /// Options excluding every name in `exclude_dirs`
    pub fn new<I, S>(exclude_dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self {
            exclude_dirs: exclude_dirs
                .into_iter()
                .map(|name| name.as_ref().to_os_string())
                .collect(),
        }
    }

    /// Whether a file or directory called `name` is skipped
    pub fn is_excluded(&self, name: &OsStr) -> bool {
        self.exclude_dirs.contains(name)
    }
}

/// Failure while copying a template tree
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("Failed to list {}", path.display())]
    ListFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Destination {} lies inside the template {}", dest.display(), src.display())]
    NestedDestination { src: PathBuf, dest: PathBuf },

    #[error("Failed to copy {} to {}", from.display(), to.display())]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CopyError {
    /// The path whose listing, creation, or copy failed
    pub fn path(&self) -> &Path {
        match self {
            CopyError::ListFailed { path, .. } | CopyError::CreateDir { path, .. } => path,
            CopyError::NestedDestination { dest, .. } => dest,
            CopyError::CopyFile { from, .. } => from,
        }
    }
}

/// Counts of what a copy produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub dirs: usize,
}

/// Copy every non-excluded entry of `src` into `dest`, overwriting existing files
///
/// The walk is depth-first and pre-order, so each directory is created before
/// anything inside it is copied. An excluded name prunes the entry and all of
/// its descendants. The first failure aborts the copy. A file that already is
/// its own destination (copying a directory onto itself) is left untouched.
pub fn copy_tree(src: &Path, dest: &Path, options: &CopyOptions) -> Result<CopyStats, CopyError> {
    let root = fs::metadata(src).map_err(|source| CopyError::ListFailed {
        path: src.to_path_buf(),
        source,
    })?;
    if !root.is_dir() {
        return Err(CopyError::ListFailed {
            path: src.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        });
    }

    reject_nested_destination(src, dest)?;
    fs::create_dir_all(dest).map_err(|source| CopyError::CreateDir {
        path: dest.to_path_buf(),
        source,
    })?;

    let mut stats = CopyStats::default();

    let walker = WalkDir::new(src)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| {
            if options.is_excluded(entry.file_name()) {
                tracing::debug!(path = %entry.path().display(), "skipping excluded entry");
                return false;
            }
            true
        });

    for entry in walker {
        let entry = entry.map_err(|err| CopyError::ListFailed {
            path: err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| src.to_path_buf()),
            source: io::Error::from(err),
        })?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| CopyError::ListFailed {
                path: entry.path().to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidData, "entry outside the template"),
            })?;
        let target = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|source| CopyError::CreateDir {
                path: target.clone(),
                source,
            })?;
            stats.dirs += 1;
        } else if file_type.is_file() {
            // fs::copy truncates the destination before reading the source
            if matches!(is_same_file(entry.path(), &target), Ok(true)) {
                tracing::debug!(file = %relative.display(), "source and destination are the same file");
                continue;
            }
            fs::copy(entry.path(), &target).map_err(|source| CopyError::CopyFile {
                from: entry.path().to_path_buf(),
                to: target.clone(),
                source,
            })?;
            tracing::debug!(file = %relative.display(), "copied");
            stats.files += 1;
        } else {
            tracing::debug!(path = %entry.path().display(), "skipping special file");
        }
    }

    Ok(stats)
}

/// Fail when `dest` is a strict subdirectory of `src`; the walk would re-read its own output
fn reject_nested_destination(src: &Path, dest: &Path) -> Result<(), CopyError> {
    let (Ok(src), Some(dest)) = (src.canonicalize(), resolve_missing(dest)) else {
        return Ok(());
    };
    if dest != src && dest.starts_with(&src) {
        return Err(CopyError::NestedDestination { src, dest });
    }
    Ok(())
}

/// Canonical form of a path whose trailing components may not exist yet
fn resolve_missing(path: &Path) -> Option<PathBuf> {
    path.canonicalize().ok().or_else(|| {
        let parent = resolve_missing(path.parent()?)?;
        Some(parent.join(path.file_name()?))
    })
}
