//! # omura-client
//!
//! Transport for the Gemini protocol: one request per TLS connection, server identity by
//! trust-on-first-use pinning instead of certificate authorities.
//!
//! A request goes through these pieces, in order:
//!
//! - [request]: validates the destination and renders the request line;
//! - [client]: opens TCP and TLS, with the [verifier] consulting the [trust] store from
//!   inside the handshake;
//! - [framer]: splits the byte stream into the header line and the body as it arrives;
//! - [status]: checks the status code and assigns its group.
//!
//! Requests never retry and are never pooled: any failure ends the request with an
//! [Error].

pub mod client;
pub mod error;
pub mod framer;
pub mod request;
pub mod response;
pub mod status;
pub mod trust;
pub mod verifier;

pub use client::{Client, ClientOptions, DEFAULT_PORT};
pub use error::{Error, RequestValidationError, TransportError};
pub use request::Request;
pub use response::Response;
pub use status::{ResponseHeader, StatusGroup};
pub use trust::{
    FileStorage, FingerprintMismatch, KnownHosts, KnownHostsStorage, MemoryStorage, StoreError,
    TrustDecision, TrustStore,
};
