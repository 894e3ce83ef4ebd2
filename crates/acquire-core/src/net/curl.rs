//! libcurl backend (easy interface).

use super::{Session, Transport};
use crate::error::TransportError;
use std::io::{self, Write};
use std::time::Duration;

/// Options applied to every easy handle.
///
/// The default sets nothing: no connect or total timeout, no redirects, no
/// custom user agent. A stalled server therefore blocks the caller until the
/// peer or the kernel gives up; set `timeout` to bound a transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub follow_redirects: bool,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    options: TransportOptions,
}

impl CurlTransport {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TransportOptions {
        &self.options
    }
}

impl Transport for CurlTransport {
    type Session = CurlSession;

    fn session(&self) -> Result<CurlSession, TransportError> {
        let mut easy = ::curl::easy::Easy::new();
        easy.follow_location(self.options.follow_redirects)?;
        if let Some(t) = self.options.connect_timeout {
            easy.connect_timeout(t)?;
        }
        if let Some(t) = self.options.timeout {
            easy.timeout(t)?;
        }
        if let Some(ua) = &self.options.user_agent {
            easy.useragent(ua)?;
        }
        Ok(CurlSession { easy })
    }
}

/// Owns one easy handle; `curl_easy_cleanup` runs on drop.
pub struct CurlSession {
    easy: ::curl::easy::Easy,
}

impl Session for CurlSession {
    fn get(&mut self, url: &str, sink: &mut dyn Write) -> Result<u32, TransportError> {
        self.easy.url(url)?;
        self.easy.get(true)?;

        let mut sink_error: Option<io::Error> = None;
        let performed = {
            let mut transfer = self.easy.transfer();
            transfer.write_function(|data| match sink.write_all(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    sink_error = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Err(e) = performed {
            if e.is_write_error() {
                if let Some(io_err) = sink_error.take() {
                    return Err(TransportError::write_failure(&io_err));
                }
            }
            return Err(e.into());
        }

        Ok(self.easy.response_code()?)
    }

    fn escape(&mut self, input: &str) -> String {
        self.easy.url_encode(input.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_configure_nothing() {
        let opts = TransportOptions::default();
        assert!(opts.connect_timeout.is_none());
        assert!(opts.timeout.is_none());
        assert!(!opts.follow_redirects);
        assert!(opts.user_agent.is_none());
    }

    #[test]
    fn session_applies_options() {
        let transport = CurlTransport::new(TransportOptions {
            connect_timeout: Some(Duration::from_secs(5)),
            timeout: Some(Duration::from_secs(30)),
            follow_redirects: true,
            user_agent: Some("oscap-acquire-test".into()),
        });
        assert!(transport.session().is_ok());
    }

    #[test]
    fn escape_reserved_characters() {
        let mut session = CurlTransport::default().session().unwrap();
        assert_eq!(session.escape("a b"), "a%20b");
        assert_eq!(session.escape("http://h/p?q#f"), "http%3A%2F%2Fh%2Fp%3Fq%23f");
        assert_eq!(session.escape("A-z_0.9~"), "A-z_0.9~");
    }

    #[test]
    fn get_unparseable_url_is_transport_error() {
        let mut session = CurlTransport::default().session().unwrap();
        let mut sink = Vec::new();
        let err = session.get("http://[::1", &mut sink).unwrap_err();
        assert!(!err.message().is_empty());
        assert!(sink.is_empty());
    }
}
