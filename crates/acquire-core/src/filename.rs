//! Filesystem-safe names derived from URLs.
//!
//! Percent-encodes the whole URL (RFC 3986, section 2.1) so the result is a
//! single path component: `/`, `:`, `?`, `#`, spaces and every other byte
//! outside the unreserved set become `%XX`. No network I/O happens here; the
//! transport is only borrowed for its escaping routine.

use crate::error::AcquireError;
use crate::net::{CurlTransport, Session, Transport};

/// Encodes `url` with the default libcurl transport.
pub fn encode(url: &str) -> Result<String, AcquireError> {
    encode_with(&CurlTransport::default(), url)
}

/// Encodes `url` using `transport`'s escaping routine.
pub fn encode_with<T: Transport>(transport: &T, url: &str) -> Result<String, AcquireError> {
    let mut session = transport
        .session()
        .map_err(|source| AcquireError::Encoding {
            url: url.to_string(),
            source,
        })?;
    Ok(session.escape(url))
}
