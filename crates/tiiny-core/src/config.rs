// ── Runtime publisher configuration ──
//
// Describes how to reach the publishing service: endpoint, key, TLS and
// timeout. Never touches disk; the CLI builds one from its profile and
// hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use tiiny_api::{TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. Only for self-hosted test endpoints.
    DangerAcceptInvalid,
}

/// Everything a [`Publisher`](crate::Publisher) needs to talk to the service.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Service root, e.g. `https://api.tiiny.host`.
    pub api_url: String,
    pub api_key: SecretString,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl PublisherConfig {
    /// Config for the public endpoint with default TLS and timeout.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_url: tiiny_api::DEFAULT_API_URL.into(),
            api_key,
            tls: TlsVerification::default(),
            timeout: TransportConfig::default().timeout,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: tls_to_transport(&self.tls),
            timeout: self.timeout,
        }
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
