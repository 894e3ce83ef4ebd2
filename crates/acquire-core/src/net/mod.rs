//! Network capability used by the downloader and the filename encoder.
//!
//! The rest of the crate only sees [`Transport`] and [`Session`], so tests can
//! substitute an in-memory transport. [`CurlTransport`] is the libcurl backend.

mod curl;

pub use self::curl::{CurlSession, CurlTransport, TransportOptions};

use crate::error::TransportError;
use std::io::Write;

/// Factory for transport sessions. One session is initialized per operation.
pub trait Transport {
    type Session: Session;

    /// Initializes a transport context (libcurl: an easy handle with options applied).
    fn session(&self) -> Result<Self::Session, TransportError>;
}

/// One initialized transport context. Released when dropped.
pub trait Session {
    /// Issues a GET for `url`, writing the body into `sink` as it arrives.
    /// Returns the response code; a non-2xx code is not an error here.
    fn get(&mut self, url: &str, sink: &mut dyn Write) -> Result<u32, TransportError>;

    /// Percent-encodes every byte of `input` outside the RFC 3986 unreserved set.
    fn escape(&mut self, input: &str) -> String;
}

/// Process-wide libcurl initialization. Call once from `main` before any
/// other thread is started; later calls are no-ops.
pub fn global_init() {
    ::curl::init();
}
