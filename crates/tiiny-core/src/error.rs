// ── Core error types ──
//
// Per-item errors from tiiny-core. Transport-level failures from
// tiiny-api are folded into `Upstream`, which always names the endpoint
// and the status (when the service answered at all).

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    #[error("Invalid site link format: {link}. Expected format: subdomain.domain.suffix")]
    InvalidLinkFormat { link: String },

    #[error("No binary data property '{property}' found")]
    MissingBinaryData { property: String },

    #[error("Missing required parameter '{name}'")]
    MissingParameter { name: String },

    #[error("The operation \"{operation}\" is not supported")]
    UnknownOperation { operation: String },

    // ── Service errors ───────────────────────────────────────────────
    #[error("{endpoint} failed{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Upstream {
        endpoint: String,
        /// HTTP status code, `None` for transport failures.
        status: Option<u16>,
        message: String,
    },

    #[error("No link returned from API")]
    MissingLink,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Cannot reach {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("{endpoint} timed out")]
    Timeout { endpoint: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A [`CoreError`] annotated with the index of the item that raised it.
#[derive(Debug, Error)]
#[error("{source} [item {index}]")]
pub struct ItemError {
    pub index: usize,
    #[source]
    pub source: CoreError,
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<tiiny_api::Error> for CoreError {
    fn from(err: tiiny_api::Error) -> Self {
        match err {
            tiiny_api::Error::InvalidApiKey { endpoint, status } => CoreError::Upstream {
                endpoint,
                status: Some(status),
                message: "API key rejected".into(),
            },
            tiiny_api::Error::Api {
                endpoint,
                status,
                message,
            } => CoreError::Upstream {
                endpoint,
                status: Some(status),
                message,
            },
            tiiny_api::Error::Transport(e) => transport_error(&e),
            tiiny_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("unexpected response body: {message}"))
            }
            tiiny_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            tiiny_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid API URL: {e}"),
            },
            tiiny_api::Error::Tls(message) => CoreError::Config { message },
        }
    }
}

fn transport_error(e: &reqwest::Error) -> CoreError {
    let endpoint = e
        .url()
        .and_then(|u| u.path_segments()?.next_back().map(|s| format!("/{s}")))
        .unwrap_or_else(|| "<unknown>".into());

    if e.is_timeout() {
        CoreError::Timeout { endpoint }
    } else if e.is_connect() {
        CoreError::ConnectionFailed {
            url: e.url().map_or_else(|| endpoint.clone(), ToString::to_string),
            reason: e.to_string(),
        }
    } else {
        CoreError::Upstream {
            endpoint,
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_includes_status() {
        let err = CoreError::from(tiiny_api::Error::Api {
            endpoint: "/upload".into(),
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(err.to_string(), "/upload failed (HTTP 500): boom");
    }

    #[test]
    fn rejected_key_keeps_status() {
        let err = CoreError::from(tiiny_api::Error::InvalidApiKey {
            endpoint: "/profile".into(),
            status: 401,
        });
        assert!(matches!(err, CoreError::Upstream { status: Some(401), .. }));
        assert_eq!(err.to_string(), "/profile failed (HTTP 401): API key rejected");
    }

    #[test]
    fn item_error_names_index() {
        let err = ItemError {
            index: 3,
            source: CoreError::MissingLink,
        };
        assert_eq!(err.to_string(), "No link returned from API [item 3]");
    }
}
