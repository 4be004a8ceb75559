use thiserror::Error;

/// Top-level error type for the `tiiny-api` crate.
///
/// Covers every failure mode of the publishing API: authentication,
/// transport, non-2xx responses, and body decoding.
/// `tiiny-core` maps these into per-item diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// API key rejected by the service (HTTP 401/403).
    #[error("Invalid API key (HTTP {status} from {endpoint})")]
    InvalidApiKey { endpoint: String, status: u16 },

    /// The API key could not be turned into a header value.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response from one of the publishing endpoints.
    #[error("{endpoint} failed (HTTP {status}): {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
