//! Secure staging of remote documents.
//!
//! A caller creates a private [`TempDir`], checks the URL with
//! [`is_supported`], downloads it with [`download`] (or [`Downloader`] for a
//! custom transport), hands the returned path to its parser, and finally
//! calls [`TempDir::destroy`]. [`stage`] does the first three steps at once.
//!
//! Every operation blocks the calling thread. libcurl's process-wide setup
//! ([`net::global_init`]) is the caller's job.

pub mod config;
pub mod logging;

pub mod download;
pub mod error;
pub mod filename;
pub mod net;
pub mod scheme;
pub mod stage;
pub mod tempdir;

pub use download::{download, Downloader};
pub use error::{AcquireError, ErrorKind};
pub use filename::{encode, encode_with};
pub use scheme::{is_supported, Scheme};
pub use stage::{stage, Staged, Stager};
pub use tempdir::TempDir;
