//! Error types returned by every acquisition operation.
//!
//! Each failure carries its kind plus the OS or transport diagnostic, so an
//! operator can tell a permissions problem from a network outage or a full
//! disk without reading this crate.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure class of an [`AcquireError`], for callers that only need to branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DirectoryCreation,
    FileCreation,
    ClientInit,
    Transfer,
    Encoding,
    Cleanup,
    UnsupportedScheme,
}

#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    /// The OS refused to create a private temp directory under `root`.
    #[error("could not create temp directory {}/{prefix}XXXXXX: {source}", .root.display())]
    DirectoryCreation {
        root: PathBuf,
        prefix: String,
        #[source]
        source: io::Error,
    },

    /// Exclusive creation (or permission hardening) of the download file failed.
    #[error("could not create download file in {}: {source}", .dir.display())]
    FileCreation {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The transport capability could not be initialized.
    #[error("failed to initialize transport: {0}")]
    ClientInit(#[source] TransportError),

    /// The GET failed at the transport level (not an HTTP status).
    #[error("download of {url} failed: {source}")]
    Transfer {
        url: String,
        #[source]
        source: TransportError,
    },

    /// The transport context needed for escaping could not be initialized.
    #[error("failed to initialize transport for escaping {url}: {source}")]
    Encoding {
        url: String,
        #[source]
        source: TransportError,
    },

    /// Recursive removal left entries behind.
    #[error("{0}")]
    Cleanup(CleanupReport),

    /// The URL's scheme is not one this crate fetches.
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

impl AcquireError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AcquireError::DirectoryCreation { .. } => ErrorKind::DirectoryCreation,
            AcquireError::FileCreation { .. } => ErrorKind::FileCreation,
            AcquireError::ClientInit(_) => ErrorKind::ClientInit,
            AcquireError::Transfer { .. } => ErrorKind::Transfer,
            AcquireError::Encoding { .. } => ErrorKind::Encoding,
            AcquireError::Cleanup(_) => ErrorKind::Cleanup,
            AcquireError::UnsupportedScheme(_) => ErrorKind::UnsupportedScheme,
        }
    }
}

/// Error from the transport capability (libcurl or a substitute).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    write_failure: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            write_failure: false,
        }
    }

    /// Transfer aborted because the local sink could not take the bytes.
    pub fn write_failure(err: &io::Error) -> Self {
        Self {
            message: format!("writing received data failed: {}", err),
            write_failure: true,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_write_failure(&self) -> bool {
        self.write_failure
    }
}

impl From<curl::Error> for TransportError {
    fn from(e: curl::Error) -> Self {
        let mut message = e.description().to_string();
        if let Some(extra) = e.extra_description() {
            message.push_str(": ");
            message.push_str(extra);
        }
        Self {
            message,
            write_failure: e.is_write_error(),
        }
    }
}

/// One entry that could not be removed during a recursive cleanup.
#[derive(Debug)]
pub struct CleanupFailure {
    pub path: PathBuf,
    pub reason: CleanupReason,
}

#[derive(Debug)]
pub enum CleanupReason {
    /// `remove_file`, `remove_dir` or `read_dir` failed.
    Io(io::Error),
    /// Entry lives on another filesystem; it is never descended into or removed.
    MountBoundary,
}

impl fmt::Display for CleanupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            CleanupReason::Io(e) => write!(f, "could not remove {}: {}", self.path.display(), e),
            CleanupReason::MountBoundary => write!(
                f,
                "skipped {}: on a different filesystem",
                self.path.display()
            ),
        }
    }
}

/// Every failure collected while destroying one temp directory.
#[derive(Debug)]
pub struct CleanupReport {
    pub root: PathBuf,
    pub failures: Vec<CleanupFailure>,
}

impl fmt::Display for CleanupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cleanup of {} left {} entr{} behind",
            self.root.display(),
            self.failures.len(),
            if self.failures.len() == 1 { "y" } else { "ies" }
        )?;
        for failure in &self.failures {
            write!(f, "; {}", failure)?;
        }
        Ok(())
    }
}
