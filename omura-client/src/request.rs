//! Request validation
//!
//! A Gemini request is a single line: the absolute URI followed by CRLF. The URI must have a
//! host, must not carry userinfo or a fragment, and must serialize to at most 1024 bytes.
//! These are checked when a [Request] is built, so holding one means it can be sent.

use std::net::IpAddr;

use rustls::pki_types::ServerName;
use url::{Host, Url};

use crate::error::{RequestValidationError, TransportError};

pub const MAX_REQUEST_LEN: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    url: Url,
}

impl Request {
    /// Parse a destination typed by a user. Without a scheme, `gemini://` is assumed.
    pub fn parse(destination: &str) -> Result<Self, RequestValidationError> {
        let destination = destination.trim();
        let url = if destination.contains("://") {
            Url::parse(destination)?
        } else {
            Url::parse(&format!("gemini://{destination}"))?
        };
        Self::from_url(url)
    }

    pub fn from_url(url: Url) -> Result<Self, RequestValidationError> {
        if !url.username().is_empty() || url.password().is_some() {
            return Err(RequestValidationError::Userinfo);
        }
        if url.fragment().is_some() {
            return Err(RequestValidationError::Fragment);
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(RequestValidationError::MissingHost);
        }
        let len = url.as_str().len();
        if len > MAX_REQUEST_LEN {
            return Err(RequestValidationError::TooLong(len));
        }
        Ok(Self { url })
    }

    /// Resolve a link target, absolute or relative, against this request.
    pub fn resolve(&self, reference: &str) -> Result<Self, RequestValidationError> {
        let mut url = self.url.join(reference.trim())?;
        url.set_fragment(None);
        Self::from_url(url)
    }

    /// Build `<endpoint>?<query>` for an input prompt or a search service.
    pub fn search(endpoint: &str, query: &str) -> Result<Self, RequestValidationError> {
        let mut url = Self::parse(endpoint)?.url;
        // form encoding writes spaces as '+'; Gemini servers expect %20
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes())
            .collect::<String>()
            .replace('+', "%20");
        url.set_query(Some(&encoded));
        Self::from_url(url)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The line written to the server, CRLF included.
    pub fn line(&self) -> String {
        format!("{}\r\n", self.url)
    }

    /// Host name used for connecting and as the trust store key. IPv6 literals have no
    /// brackets.
    pub fn host(&self) -> String {
        match self.url.host() {
            Some(Host::Domain(domain)) => domain.to_ascii_lowercase(),
            Some(Host::Ipv4(addr)) => addr.to_string(),
            Some(Host::Ipv6(addr)) => addr.to_string(),
            None => String::new(),
        }
    }

    /// Port given in the URI, if any.
    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }

    pub(crate) fn server_name(&self) -> Result<ServerName<'static>, TransportError> {
        match self.url.host() {
            // hosts of gemini:// URLs are opaque, so IPv4 literals arrive as domains
            Some(Host::Domain(domain)) => match domain.parse::<IpAddr>() {
                Ok(addr) => Ok(ServerName::IpAddress(addr.into())),
                Err(_) => ServerName::try_from(domain.to_string())
                    .map_err(|_| TransportError::ServerName(domain.to_string())),
            },
            Some(Host::Ipv4(addr)) => Ok(ServerName::IpAddress(IpAddr::V4(addr).into())),
            Some(Host::Ipv6(addr)) => Ok(ServerName::IpAddress(IpAddr::V6(addr).into())),
            None => Err(TransportError::ServerName(String::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_line_ends_with_crlf() {
        let request = Request::parse("gemini://x.example/docs/").unwrap();
        assert_eq!(request.line(), "gemini://x.example/docs/\r\n");
    }

    #[test]
    fn test_default_scheme() {
        let request = Request::parse("geminiprotocol.net/docs/").unwrap();
        assert_eq!(request.url().as_str(), "gemini://geminiprotocol.net/docs/");
        assert_eq!(request.host(), "geminiprotocol.net");
        assert_eq!(request.port(), None);
    }

    #[test]
    fn test_explicit_port() {
        let request = Request::parse("gemini://127.0.0.1:1966/").unwrap();
        assert_eq!(request.port(), Some(1966));
        assert_eq!(request.host(), "127.0.0.1");
    }

    #[test]
    fn test_ipv6_host_has_no_brackets() {
        let request = Request::parse("gemini://[::1]/").unwrap();
        assert_eq!(request.host(), "::1");
        assert!(request.server_name().is_ok());
    }

    #[rstest]
    #[case("gemini://user:pw@x.example/")]
    #[case("gemini://user@x.example/")]
    fn test_rejects_userinfo(#[case] uri: &str) {
        assert!(matches!(
            Request::parse(uri),
            Err(RequestValidationError::Userinfo)
        ));
    }

    #[test]
    fn test_rejects_fragment() {
        assert!(matches!(
            Request::parse("gemini://x.example/#top"),
            Err(RequestValidationError::Fragment)
        ));
    }

    #[test]
    fn test_rejects_missing_host() {
        assert!(matches!(
            Request::parse("gemini:///path"),
            Err(RequestValidationError::MissingHost)
        ));
    }

    #[test]
    fn test_length_limit() {
        let base = "gemini://x.example/";
        let fits = format!("{base}{}", "a".repeat(MAX_REQUEST_LEN - base.len()));
        assert!(Request::parse(&fits).is_ok());
        let over = format!("{fits}a");
        assert!(matches!(
            Request::parse(&over),
            Err(RequestValidationError::TooLong(1025))
        ));
    }

    #[test]
    fn test_resolve_relative_link() {
        let page = Request::parse("gemini://x.example/docs/index.gmi").unwrap();
        let link = page.resolve("../about.gmi").unwrap();
        assert_eq!(link.url().as_str(), "gemini://x.example/about.gmi");
        let other = page.resolve("gemini://y.example/").unwrap();
        assert_eq!(other.host(), "y.example");
    }

    #[test]
    fn test_search_encodes_query() {
        let request = Request::search("gemini://search.example/q", "rust & gemini+tls").unwrap();
        assert_eq!(
            request.url().as_str(),
            "gemini://search.example/q?rust%20%26%20gemini%2Btls"
        );
    }
}
