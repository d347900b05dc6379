use std::io;

use crate::framer::FramingError;
use crate::status::InvalidStatus;
use crate::trust::{FingerprintMismatch, StoreError};

/// Errors produced by a Gemini request.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The destination is not a valid request URI. Nothing was sent.
    #[error("invalid request: {0}")]
    RequestValidation(#[from] RequestValidationError),

    /// Connecting, the TLS handshake, or a socket read or write failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server presented a certificate other than the one pinned for its host.
    #[error(transparent)]
    CertificateMismatch(#[from] FingerprintMismatch),

    /// No progress on the socket within the idle timeout.
    #[error("timeout")]
    Timeout,

    /// More than 2048 bytes arrived without a header line terminator.
    #[error("response header too long or CRLF not found")]
    HeaderTooLong,

    /// The server closed the connection before sending a complete header line.
    #[error("connection closed before a response header was received")]
    MissingHeader,

    /// The status code is outside 10..=69.
    #[error("invalid status code {code}")]
    InvalidStatus { code: u8 },

    /// The known hosts store could not be read or written.
    #[error("known hosts: {0}")]
    TrustStore(#[from] StoreError),
}

impl From<FramingError> for Error {
    fn from(err: FramingError) -> Self {
        match err {
            FramingError::HeaderTooLong => Error::HeaderTooLong,
            FramingError::MissingHeader => Error::MissingHeader,
        }
    }
}

impl From<InvalidStatus> for Error {
    fn from(err: InvalidStatus) -> Self {
        Error::InvalidStatus { code: err.code }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Error::Timeout,
            _ => Error::Transport(TransportError::Io(err)),
        }
    }
}

/// Reasons a destination is refused before any I/O.
#[derive(Debug, thiserror::Error)]
pub enum RequestValidationError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("userinfo not allowed in URI")]
    Userinfo,

    #[error("URI must not include a fragment")]
    Fragment,

    #[error("URI has no host")]
    MissingHost,

    #[error("URI is {0} bytes, must not exceed 1024 bytes")]
    TooLong(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("cannot connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("{0} does not resolve to any address")]
    Unresolved(String),

    #[error("invalid server name {0:?}")]
    ServerName(String),

    #[error("tls error: {0}")]
    Tls(#[from] rustls::Error),

    #[error("io error: {0}")]
    Io(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_timeouts_become_timeout() {
        let err: Error = io::Error::new(io::ErrorKind::WouldBlock, "read").into();
        assert!(matches!(err, Error::Timeout));
        let err: Error = io::Error::new(io::ErrorKind::TimedOut, "write").into();
        assert!(matches!(err, Error::Timeout));
    }

    #[test]
    fn test_other_io_errors_are_transport() {
        let err: Error = io::Error::new(io::ErrorKind::ConnectionReset, "reset").into();
        assert!(matches!(err, Error::Transport(TransportError::Io(_))));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::InvalidStatus { code: 71 }.to_string(),
            "invalid status code 71"
        );
        assert_eq!(
            Error::from(RequestValidationError::TooLong(1100)).to_string(),
            "invalid request: URI is 1100 bytes, must not exceed 1024 bytes"
        );
    }
}
