//! Transport client
//!
//!     One request per connection: connect, handshake, write the request line, read until
//!     the server closes. There is no pooling, no keep-alive and no retry.
//!
//!     TLS 1.2 and 1.3 only, ALPN `gemini`, no client certificate. Server identity is
//!     decided by the [TofuVerifier] built for each request, which shares the client's
//!     [TrustStore].
//!
//!     Every socket read and write is bounded by the idle timeout. A server that closes the
//!     connection without a TLS close_notify has still sent a complete response.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rustls::crypto::CryptoProvider;
use rustls::{ClientConfig, ClientConnection, StreamOwned};
use tracing::debug;

use crate::error::{Error, TransportError};
use crate::framer::{Progress, ResponseFramer};
use crate::request::Request;
use crate::response::Response;
use crate::status::ResponseHeader;
use crate::trust::{FileStorage, KnownHostsStorage, TrustError, TrustStore};
use crate::verifier::TofuVerifier;

pub const DEFAULT_PORT: u16 = 1965;
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

const ALPN_GEMINI: &[u8] = b"gemini";
const READ_CHUNK: usize = 16 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Port used when the URI names none.
    pub port: u16,
    pub idle_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

pub struct Client {
    store: Arc<Mutex<TrustStore>>,
    options: ClientOptions,
    provider: Arc<CryptoProvider>,
}

impl Client {
    /// A client pinning to a JSON known hosts file.
    pub fn new(known_hosts: impl Into<PathBuf>) -> Result<Self, Error> {
        Self::with_storage(FileStorage::new(known_hosts), ClientOptions::default())
    }

    pub fn with_storage(
        storage: impl KnownHostsStorage + 'static,
        options: ClientOptions,
    ) -> Result<Self, Error> {
        let store = TrustStore::open(storage)?;
        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            options,
            provider: Arc::new(rustls::crypto::ring::default_provider()),
        })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// The fingerprint pinned for `host`, if any.
    pub fn trusted_fingerprint(&self, host: &str) -> Option<String> {
        let store = self.store.lock().ok()?;
        store.fingerprint(host).map(str::to_string)
    }

    /// Validate `destination` and send it.
    pub fn send_request(&mut self, destination: &str) -> Result<Response, Error> {
        let request = Request::parse(destination)?;
        self.send(&request)
    }

    pub fn send(&mut self, request: &Request) -> Result<Response, Error> {
        let host = request.host();
        let port = request.port().unwrap_or(self.options.port);

        let verifier = Arc::new(TofuVerifier::new(
            host.as_str(),
            Arc::clone(&self.store),
            Arc::clone(&self.provider),
        ));
        let config = self.tls_config(Arc::clone(&verifier))?;
        let connection = ClientConnection::new(Arc::new(config), request.server_name()?)
            .map_err(TransportError::Tls)?;
        let socket = self.connect(&host, port)?;
        let mut stream = StreamOwned::new(connection, socket);

        self.exchange(&mut stream, request)
            .map_err(|err| match verifier.take_failure() {
                Some(TrustError::Mismatch(mismatch)) => Error::CertificateMismatch(mismatch),
                Some(TrustError::Store(store)) => Error::TrustStore(store),
                None => err,
            })
    }

    fn tls_config(&self, verifier: Arc<TofuVerifier>) -> Result<ClientConfig, Error> {
        let mut config = ClientConfig::builder_with_provider(Arc::clone(&self.provider))
            .with_protocol_versions(&[&rustls::version::TLS13, &rustls::version::TLS12])
            .map_err(TransportError::Tls)?
            .dangerous()
            .with_custom_certificate_verifier(verifier)
            .with_no_client_auth();
        config.alpn_protocols = vec![ALPN_GEMINI.to_vec()];
        Ok(config)
    }

    fn connect(&self, host: &str, port: u16) -> Result<TcpStream, Error> {
        let addr = format!("{host}:{port}");
        let addrs = (host, port)
            .to_socket_addrs()
            .map_err(|source| TransportError::Connect {
                addr: addr.clone(),
                source,
            })?;

        let mut last_error = None;
        for candidate in addrs {
            debug!(%candidate, "connecting");
            match TcpStream::connect_timeout(&candidate, self.options.idle_timeout) {
                Ok(socket) => {
                    socket.set_read_timeout(Some(self.options.idle_timeout))?;
                    socket.set_write_timeout(Some(self.options.idle_timeout))?;
                    return Ok(socket);
                }
                Err(err) => last_error = Some(err),
            }
        }
        Err(match last_error {
            Some(err) if err.kind() == io::ErrorKind::TimedOut => Error::Timeout,
            Some(source) => TransportError::Connect { addr, source }.into(),
            None => TransportError::Unresolved(addr).into(),
        })
    }

    fn exchange(
        &self,
        stream: &mut StreamOwned<ClientConnection, TcpStream>,
        request: &Request,
    ) -> Result<Response, Error> {
        stream.write_all(request.line().as_bytes())?;
        stream.flush()?;
        debug!(
            url = %request.url(),
            version = ?stream.conn.protocol_version(),
            "request sent"
        );

        let mut framer = ResponseFramer::new();
        let mut header = None;
        let mut body = Vec::new();
        let mut chunk = vec![0u8; READ_CHUNK];
        loop {
            let read = match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => read,
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            match framer.push(&chunk[..read])? {
                Progress::NeedMore => {}
                Progress::Header { header: line, body: rest } => {
                    debug!(status = line.status, meta = %line.meta, "response header");
                    header = Some(line);
                    body.extend_from_slice(&rest);
                }
                Progress::Body(bytes) => body.extend_from_slice(bytes),
            }
        }
        framer.finish()?;

        let line = header.ok_or(Error::MissingHeader)?;
        let header = ResponseHeader::from_line(line)?;
        debug!(bytes = body.len(), "response complete");
        Ok(Response::new(header, body))
    }
}
