//! Trust-on-first-use pinning
//!
//!     The trust store maps host names to the SHA-256 fingerprint (lowercase hex of the DER
//!     certificate) first seen for them. The first certificate a host presents is pinned;
//!     afterwards only that exact certificate is accepted, and a pin is never replaced.
//!
//! Persistence
//!
//!     The store is loaded once when it is opened and written back in full after every new
//!     pin, through a [KnownHostsStorage] backend. If writing fails the new pin is dropped
//!     again, so memory and storage never disagree.
//!
//!     Two processes sharing one file both read it at startup; if both pin the same new host
//!     at the same time, the later write wins. Locking across processes is left to callers.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// Host name to fingerprint.
pub type KnownHosts = BTreeMap<String, String>;

/// Lowercase hex SHA-256 of a DER certificate.
pub fn fingerprint(der: &[u8]) -> String {
    format!("{:x}", Sha256::digest(der))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("certificate fingerprint mismatch for {host}: pinned {expected}, presented {presented}")]
pub struct FingerprintMismatch {
    pub host: String,
    pub expected: String,
    pub presented: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("{} is not a known hosts file: {source}", .path.display())]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("known hosts storage is unavailable")]
    Unavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum TrustError {
    #[error(transparent)]
    Mismatch(#[from] FingerprintMismatch),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Where pins are kept between runs.
pub trait KnownHostsStorage: Send {
    fn load(&self) -> Result<KnownHosts, StoreError>;
    fn save(&self, hosts: &KnownHosts) -> Result<(), StoreError>;
}

/// A pretty-printed JSON object in a file. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KnownHostsStorage for FileStorage {
    fn load(&self) -> Result<KnownHosts, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(KnownHosts::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, hosts: &KnownHosts) -> Result<(), StoreError> {
        let write_error = |source: io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        let json = serde_json::to_string_pretty(hosts).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(write_error)
    }
}

/// In-memory storage. Clones share the same map, so a test can keep one clone and inspect
/// what the client saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    hosts: Arc<Mutex<KnownHosts>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hosts(hosts: KnownHosts) -> Self {
        Self {
            hosts: Arc::new(Mutex::new(hosts)),
        }
    }

    pub fn snapshot(&self) -> KnownHosts {
        self.hosts.lock().map(|h| h.clone()).unwrap_or_default()
    }
}

impl KnownHostsStorage for MemoryStorage {
    fn load(&self) -> Result<KnownHosts, StoreError> {
        self.hosts
            .lock()
            .map(|h| h.clone())
            .map_err(|_| StoreError::Unavailable)
    }

    fn save(&self, hosts: &KnownHosts) -> Result<(), StoreError> {
        let mut stored = self.hosts.lock().map_err(|_| StoreError::Unavailable)?;
        *stored = hosts.clone();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustDecision {
    /// Unknown host; its fingerprint has just been pinned.
    FirstUse,
    /// The fingerprint matches the pin.
    Trusted,
}

pub struct TrustStore {
    hosts: KnownHosts,
    storage: Box<dyn KnownHostsStorage>,
}

impl TrustStore {
    pub fn open(storage: impl KnownHostsStorage + 'static) -> Result<Self, StoreError> {
        let hosts = storage.load()?;
        debug!(hosts = hosts.len(), "loaded known hosts");
        Ok(Self {
            hosts,
            storage: Box::new(storage),
        })
    }

    pub fn fingerprint(&self, host: &str) -> Option<&str> {
        self.hosts.get(host).map(String::as_str)
    }

    /// Accept or reject `presented` for `host`, pinning it if the host is new.
    pub fn check(&mut self, host: &str, presented: &str) -> Result<TrustDecision, TrustError> {
        if let Some(expected) = self.hosts.get(host) {
            if expected == presented {
                return Ok(TrustDecision::Trusted);
            }
            return Err(FingerprintMismatch {
                host: host.to_string(),
                expected: expected.clone(),
                presented: presented.to_string(),
            }
            .into());
        }

        self.hosts.insert(host.to_string(), presented.to_string());
        if let Err(err) = self.storage.save(&self.hosts) {
            self.hosts.remove(host);
            return Err(err.into());
        }
        info!(host, fingerprint = presented, "pinned certificate for new host");
        Ok(TrustDecision::FirstUse)
    }
}
