//! URL scheme classification.
//!
//! Only plain `http://` is fetched. Matching is an exact, case-sensitive
//! prefix comparison against the known set below; this is not a URL parser,
//! so `HTTP://x`, `https://x` and `ftp://x` are all unsupported.

/// Schemes this crate will attempt to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
}

impl Scheme {
    /// Every supported scheme. Widening the policy means adding a variant here.
    pub const ALL: &'static [Scheme] = &[Scheme::Http];

    /// Literal prefix a URL must start with to belong to this scheme.
    pub fn prefix(self) -> &'static str {
        match self {
            Scheme::Http => "http://",
        }
    }

    /// Classifies `url`, or `None` when no supported scheme matches exactly.
    pub fn of(url: &str) -> Option<Scheme> {
        Self::ALL
            .iter()
            .copied()
            .find(|scheme| url.starts_with(scheme.prefix()))
    }
}

/// Returns true if `url` uses a scheme this crate fetches.
pub fn is_supported(url: &str) -> bool {
    Scheme::of(url).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_is_supported() {
        assert!(is_supported("http://x"));
        assert_eq!(Scheme::of("http://example.com/oval.xml"), Some(Scheme::Http));
    }

    #[test]
    fn other_schemes_are_not() {
        assert!(!is_supported("https://x"));
        assert!(!is_supported("ftp://x"));
        assert!(!is_supported("file:///etc/passwd"));
    }

    #[test]
    fn empty_and_malformed() {
        assert!(!is_supported(""));
        assert!(!is_supported("http:/x"));
        assert!(!is_supported("http"));
        assert!(!is_supported(" http://x"));
    }

    #[test]
    fn prefix_is_case_sensitive() {
        assert!(!is_supported("HTTP://x"));
        assert!(!is_supported("Http://x"));
    }

    #[test]
    fn bare_prefix_matches() {
        assert!(is_supported("http://"));
    }
}
