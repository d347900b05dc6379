//! TOFU certificate verifier
//!
//!     Gemini servers mostly use self-signed certificates, so there is no chain validation.
//!     Instead the end-entity certificate's fingerprint is checked against the trust store
//!     while the handshake runs, and the handshake is aborted on a mismatch. Handshake
//!     signatures are still verified against the presented certificate, so a peer has to
//!     hold the private key of the certificate it shows.
//!
//!     rustls reports a rejected certificate as an opaque error. The verifier keeps the
//!     actual [TrustError] so the client can report the mismatch or storage failure itself.

use std::fmt;
use std::sync::{Arc, Mutex};

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{CertificateError, DigitallySignedStruct, SignatureScheme};
use tracing::debug;

use crate::trust::{fingerprint, StoreError, TrustError, TrustStore};

/// Verifier for a single connection to `host`.
pub struct TofuVerifier {
    host: String,
    store: Arc<Mutex<TrustStore>>,
    provider: Arc<CryptoProvider>,
    failure: Mutex<Option<TrustError>>,
}

impl TofuVerifier {
    pub fn new(
        host: impl Into<String>,
        store: Arc<Mutex<TrustStore>>,
        provider: Arc<CryptoProvider>,
    ) -> Self {
        Self {
            host: host.into(),
            store,
            provider,
            failure: Mutex::new(None),
        }
    }

    /// The trust failure that made the handshake fail, if any.
    pub fn take_failure(&self) -> Option<TrustError> {
        self.failure.lock().ok().and_then(|mut slot| slot.take())
    }

    fn reject(&self, err: TrustError) -> rustls::Error {
        let tls_error = match &err {
            TrustError::Mismatch(_) => {
                rustls::Error::InvalidCertificate(CertificateError::ApplicationVerificationFailure)
            }
            TrustError::Store(store) => rustls::Error::General(store.to_string()),
        };
        if let Ok(mut slot) = self.failure.lock() {
            *slot = Some(err);
        }
        tls_error
    }
}

impl fmt::Debug for TofuVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TofuVerifier")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

impl ServerCertVerifier for TofuVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        let presented = fingerprint(end_entity.as_ref());
        let decision = match self.store.lock() {
            Ok(mut store) => store.check(&self.host, &presented),
            Err(_) => Err(TrustError::Store(StoreError::Unavailable)),
        };
        match decision {
            Ok(decision) => {
                debug!(host = %self.host, ?decision, "server certificate accepted");
                Ok(ServerCertVerified::assertion())
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}
