//! Secure download of one URL into a private file.
//!
//! The target file `<dir>/downloaded.XXXXXX` is created exclusively
//! (`O_CREAT | O_EXCL`) and chmod'ed to 0600 before any byte is written. The
//! body is streamed straight into it. Until the transfer succeeds the file is
//! held as a [`NamedTempFile`], so every failure path removes it and the
//! directory is left as it was found.

use crate::error::{AcquireError, TransportError};
use crate::net::{CurlTransport, Session, Transport};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Name prefix of every downloaded file.
pub const FILE_PREFIX: &str = "downloaded.";

const SUFFIX_LEN: usize = 6;

/// Downloads URLs through a [`Transport`].
#[derive(Debug, Clone, Default)]
pub struct Downloader<T = CurlTransport> {
    transport: T,
}

impl<T: Transport> Downloader<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches `url` into a new private file inside `dir` and returns its absolute path.
    ///
    /// Only transport failures count; an HTTP error status still yields the
    /// file (holding the error body) and is logged at warn level. Blocks until
    /// the transfer ends; there is no timeout unless the transport sets one.
    pub fn download(&self, dir: &Path, url: &str) -> Result<PathBuf, AcquireError> {
        let dir = std::path::absolute(dir).map_err(|source| AcquireError::FileCreation {
            dir: dir.to_path_buf(),
            source,
        })?;
        let staged = create_private_file(&dir)?;

        let fetched = self.fetch_into(staged.as_file(), url);
        let code = match fetched {
            Ok(code) => code,
            Err(e) => {
                discard(staged);
                return Err(e);
            }
        };
        if !(200..300).contains(&code) {
            tracing::warn!(url, code, "server returned a non-success status; keeping body");
        }

        let (file, path) = staged.keep().map_err(|e| AcquireError::FileCreation {
            dir: dir.clone(),
            source: e.error,
        })?;
        drop(file);

        tracing::debug!(url, path = %path.display(), "download complete");
        Ok(path)
    }

    fn fetch_into(&self, file: &File, url: &str) -> Result<u32, AcquireError> {
        let mut session = self.transport.session().map_err(AcquireError::ClientInit)?;
        let transfer_error = |source| AcquireError::Transfer {
            url: url.to_string(),
            source,
        };

        let mut writer = BufWriter::new(file);
        let code = session.get(url, &mut writer).map_err(transfer_error)?;
        writer
            .flush()
            .map_err(|e| transfer_error(TransportError::write_failure(&e)))?;
        Ok(code)
    }
}

/// Downloads `url` into `dir` with the default libcurl transport.
pub fn download(dir: &Path, url: &str) -> Result<PathBuf, AcquireError> {
    Downloader::new(CurlTransport::default()).download(dir, url)
}

fn create_private_file(dir: &Path) -> Result<NamedTempFile, AcquireError> {
    let file_error = |source| AcquireError::FileCreation {
        dir: dir.to_path_buf(),
        source,
    };

    let staged = tempfile::Builder::new()
        .prefix(FILE_PREFIX)
        .rand_bytes(SUFFIX_LEN)
        .tempfile_in(dir)
        .map_err(file_error)?;

    #[cfg(unix)]
    {
        let hardened = staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o600));
        if let Err(e) = hardened {
            discard(staged);
            return Err(file_error(e));
        }
    }

    tracing::debug!(path = %staged.path().display(), "created download file");
    Ok(staged)
}

fn discard(staged: NamedTempFile) {
    let path = staged.path().to_path_buf();
    if let Err(e) = staged.close() {
        tracing::warn!(path = %path.display(), "failed to remove partial download: {}", e);
    }
}
