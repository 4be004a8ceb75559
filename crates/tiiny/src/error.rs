//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use tiiny_config::ConfigError;
use tiiny_core::{CoreError, ItemError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(tiiny::connection_failed),
        help(
            "Check your network connection and the API URL.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("{endpoint} timed out")]
    #[diagnostic(
        code(tiiny::timeout),
        help("Increase the timeout with --timeout, large uploads can take a while.")
    )]
    Timeout { endpoint: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed")]
    #[diagnostic(
        code(tiiny::auth_failed),
        help(
            "The API key was rejected. Create a new one in your Tiiny Host account,\n\
             then run: tiiny config set-key --profile {profile}"
        )
    )]
    AuthFailed { profile: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(tiiny::no_credentials),
        help(
            "Configure one with: tiiny config init\n\
             Or set the TIINY_API_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Service ──────────────────────────────────────────────────────

    #[error("{endpoint} failed{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    #[diagnostic(code(tiiny::api_error))]
    ApiError {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    #[error("{message}")]
    #[diagnostic(
        code(tiiny::publish_failed),
        help("The upload was accepted but the response did not name the site link.")
    )]
    MissingLink { message: String },

    #[error("{message} [item {index}]")]
    #[diagnostic(
        code(tiiny::batch_item),
        help("Use --continue-on-fail to record failures and process the remaining items.")
    )]
    BatchItem {
        index: usize,
        message: String,
        exit: i32,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tiiny::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(tiiny::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: tiiny config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("{message}")]
    #[diagnostic(code(tiiny::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(tiiny::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(tiiny::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::ApiError {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            Self::ApiError {
                status: Some(401 | 403),
                ..
            } => exit_code::AUTH,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::BatchItem { exit, .. } => *exit,
            _ => exit_code::GENERAL,
        }
    }

    /// Name the profile in an auth failure raised by core.
    pub fn with_profile(self, profile_name: &str) -> Self {
        match self {
            Self::AuthFailed { .. } => Self::AuthFailed {
                profile: profile_name.into(),
            },
            other => other,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::Timeout { endpoint } => CliError::Timeout { endpoint },

            CoreError::AuthenticationFailed { message: _ }
            | CoreError::Upstream {
                status: Some(401 | 403),
                ..
            } => CliError::AuthFailed {
                profile: "current".into(),
            },

            CoreError::Upstream {
                endpoint,
                status,
                message,
            } => CliError::ApiError {
                endpoint,
                status,
                message,
            },

            CoreError::MissingLink => CliError::MissingLink {
                message: err.to_string(),
            },

            CoreError::InvalidLinkFormat { .. } => CliError::Validation {
                field: "link".into(),
                reason: err.to_string(),
            },

            CoreError::MissingBinaryData { ref property } => CliError::Validation {
                field: property.clone(),
                reason: err.to_string(),
            },

            CoreError::MissingParameter { ref name } => CliError::Validation {
                field: name.clone(),
                reason: err.to_string(),
            },

            CoreError::UnknownOperation { .. } => CliError::Validation {
                field: "operation".into(),
                reason: err.to_string(),
            },

            CoreError::Config { message } | CoreError::Internal(message) => {
                CliError::Config { message }
            }
        }
    }
}

impl From<ItemError> for CliError {
    fn from(err: ItemError) -> Self {
        let message = err.source.to_string();
        let exit = CliError::from(err.source).exit_code();
        CliError::BatchItem {
            index: err.index,
            message,
            exit,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
