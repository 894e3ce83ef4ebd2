//! One-call staging: classify, create a private directory, download into it.

use crate::download::Downloader;
use crate::error::AcquireError;
use crate::net::{CurlTransport, Transport};
use crate::scheme::is_supported;
use crate::tempdir::TempDir;
use std::path::{Path, PathBuf};

/// A downloaded document and the directory holding it.
///
/// The caller must call [`Staged::destroy`] once done with the file.
#[derive(Debug)]
pub struct Staged {
    dir: TempDir,
    file: PathBuf,
}

impl Staged {
    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.path()
    }

    /// Removes the directory and the staged file.
    pub fn destroy(mut self) -> Result<(), AcquireError> {
        self.dir.destroy()
    }

    /// Leaves the directory on disk and returns the file path; nothing will remove it.
    pub fn keep(self) -> PathBuf {
        let _ = self.dir.keep();
        self.file
    }
}

/// Stages URLs under a configurable temp root.
#[derive(Debug, Clone, Default)]
pub struct Stager<T = CurlTransport> {
    root: Option<PathBuf>,
    downloader: Downloader<T>,
}

impl<T: Transport> Stager<T> {
    pub fn new(transport: T) -> Self {
        Self {
            root: None,
            downloader: Downloader::new(transport),
        }
    }

    /// Places temp directories under `root` instead of the platform temp root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Downloads `url` into a fresh temp directory.
    ///
    /// An unsupported scheme fails before anything is created. If the
    /// download fails, the new directory is destroyed before returning.
    pub fn stage(&self, url: &str) -> Result<Staged, AcquireError> {
        if !is_supported(url) {
            return Err(AcquireError::UnsupportedScheme(url.to_string()));
        }

        let mut dir = match &self.root {
            Some(root) => TempDir::create_in(root)?,
            None => TempDir::create()?,
        };
        let Some(dir_path) = dir.path().map(Path::to_path_buf) else {
            unreachable!("a freshly created TempDir owns its path");
        };

        match self.downloader.download(&dir_path, url) {
            Ok(file) => Ok(Staged { dir, file }),
            Err(e) => {
                if let Err(cleanup) = dir.destroy() {
                    tracing::warn!("{}", cleanup);
                }
                Err(e)
            }
        }
    }
}

/// Stages `url` under the platform temp root with the default libcurl transport.
pub fn stage(url: &str) -> Result<Staged, AcquireError> {
    Stager::new(CurlTransport::default()).stage(url)
}
