//! Private working directories for staged downloads.
//!
//! [`TempDir::create`] allocates `<temp-root>/oscap.XXXXXX` with mode 0700;
//! the random suffix is resolved by exclusive `mkdir` retries, never by an
//! existence check. [`TempDir::destroy`] removes the subtree depth-first
//! without following symlinks or crossing onto another filesystem, attempts
//! every entry, and reports everything it could not remove.
//!
//! Entries are listed first and removed afterwards, by path. Whoever can
//! write inside the 0700 directory (its owner) can swap a listed directory
//! for a symlink in between, and a later `remove_file` under it would then
//! resolve through that link. Only the owner can win that race.
//!
//! There is no finalizer: a handle dropped before `destroy` leaks its
//! directory (a warning is logged).

use crate::error::{AcquireError, CleanupFailure, CleanupReason, CleanupReport};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
#[cfg(unix)]
use std::os::unix::fs::{MetadataExt, PermissionsExt};

/// Name prefix of every temp directory.
pub const DIR_PREFIX: &str = "oscap.";

/// Length of the random suffix (matches a `XXXXXX` template).
const SUFFIX_LEN: usize = 6;

/// Owns one uniquely created temp directory until [`destroy`](TempDir::destroy).
#[derive(Debug)]
pub struct TempDir {
    path: Option<PathBuf>,
}

impl TempDir {
    /// Creates a directory under the platform temp root (`$TMPDIR` or `/tmp`).
    pub fn create() -> Result<Self, AcquireError> {
        Self::create_in(std::env::temp_dir())
    }

    /// Creates a directory under `root`.
    pub fn create_in(root: impl AsRef<Path>) -> Result<Self, AcquireError> {
        let path = allocate(root.as_ref())?;
        Ok(TempDir { path: Some(path) })
    }

    /// The owned directory, or `None` once destroyed.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.path.is_none()
    }

    /// Releases the directory without removing it and returns its path.
    pub fn keep(mut self) -> Option<PathBuf> {
        self.path.take()
    }

    /// Removes the directory and everything under it.
    ///
    /// The handle is empty afterwards whatever the outcome; calling this again
    /// is a no-op returning `Ok`. Entries that could not be removed are
    /// returned together in [`AcquireError::Cleanup`].
    pub fn destroy(&mut self) -> Result<(), AcquireError> {
        let Some(root) = self.path.take() else {
            return Ok(());
        };

        let failures = remove_tree(&root);
        if failures.is_empty() {
            tracing::debug!(path = %root.display(), "removed temp directory");
            return Ok(());
        }
        for failure in &failures {
            tracing::warn!("{}", failure);
        }
        Err(AcquireError::Cleanup(CleanupReport { root, failures }))
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        if let Some(path) = &self.path {
            tracing::warn!(path = %path.display(), "temp directory handle dropped without destroy");
        }
    }
}

/// Creates `<root>/oscap.XXXXXX` with mode 0700 and returns its absolute path.
fn allocate(root: &Path) -> Result<PathBuf, AcquireError> {
    let root = std::path::absolute(root).map_err(|e| dir_error(root, e))?;
    let dir = tempfile::Builder::new()
        .prefix(DIR_PREFIX)
        .rand_bytes(SUFFIX_LEN)
        .tempdir_in(&root)
        .map_err(|e| dir_error(&root, e))?;
    let path = dir.keep();

    // Mode passed to mkdir is filtered by the umask; pin it explicitly.
    #[cfg(unix)]
    {
        if let Err(e) = fs::set_permissions(&path, fs::Permissions::from_mode(0o700)) {
            roll_back(&path);
            return Err(dir_error(&root, e));
        }
    }

    tracing::debug!(path = %path.display(), "created temp directory");
    Ok(path)
}

/// Removes a directory `allocate` gave up on; a failure is only logged.
#[cfg_attr(not(unix), allow(dead_code))]
fn roll_back(path: &Path) {
    if let Err(e) = fs::remove_dir(path) {
        tracing::warn!(path = %path.display(), "failed to remove abandoned temp directory: {}", e);
    }
}

fn dir_error(root: &Path, source: io::Error) -> AcquireError {
    AcquireError::DirectoryCreation {
        root: root.to_path_buf(),
        prefix: DIR_PREFIX.to_string(),
        source,
    }
}

/// Depth-first removal of `root`. Returns every failure; empty means gone.
fn remove_tree(root: &Path) -> Vec<CleanupFailure> {
    match fs::symlink_metadata(root) {
        Ok(meta) => remove_walk(root, device_of(&meta)),
        Err(e) => vec![CleanupFailure {
            path: root.to_path_buf(),
            reason: CleanupReason::Io(e),
        }],
    }
}

/// Walks `root` without following links, pruning anything whose device is
/// not `device`, then removes what was found children-first.
fn remove_walk(root: &Path, device: u64) -> Vec<CleanupFailure> {
    let mut failures = Vec::new();
    let mut found: Vec<(PathBuf, bool)> = Vec::new();

    let mut walker = WalkDir::new(root).follow_links(false).into_iter();
    while let Some(next) = walker.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                failures.push(CleanupFailure {
                    path,
                    reason: CleanupReason::Io(io::Error::from(e)),
                });
                continue;
            }
        };
        let is_dir = entry.file_type().is_dir();

        if entry.depth() > 0 {
            match entry.metadata() {
                Ok(meta) if device_of(&meta) != device => {
                    if is_dir {
                        walker.skip_current_dir();
                    }
                    failures.push(CleanupFailure {
                        path: entry.into_path(),
                        reason: CleanupReason::MountBoundary,
                    });
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    failures.push(CleanupFailure {
                        path: entry.path().to_path_buf(),
                        reason: CleanupReason::Io(io::Error::from(e)),
                    });
                    continue;
                }
            }
        }
        found.push((entry.into_path(), is_dir));
    }

    // Pre-order listing reversed: every child comes before its parent.
    for (path, is_dir) in found.into_iter().rev() {
        let removed = if is_dir {
            fs::remove_dir(&path)
        } else {
            fs::remove_file(&path)
        };
        if let Err(e) = removed {
            failures.push(CleanupFailure {
                path,
                reason: CleanupReason::Io(e),
            });
        }
    }
    failures
}

#[cfg(unix)]
fn device_of(meta: &fs::Metadata) -> u64 {
    meta.dev()
}

#[cfg(not(unix))]
fn device_of(_meta: &fs::Metadata) -> u64 {
    0
}
