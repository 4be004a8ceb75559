//! CLI configuration: thin wrapper around `tiiny_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--api-url, --api-key, --insecure, ...).

use secrecy::SecretString;

use tiiny_core::{PublisherConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use tiiny_config::{
    Config, Profile, config_path, load_config_or_default, save_config, store_api_key,
};

/// The profile a command runs under, with its publisher settings applied.
#[derive(Debug)]
pub struct ResolvedProfile {
    pub name: String,
    pub profile: Profile,
    pub publisher: PublisherConfig,
}

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Pick the profile and build a `PublisherConfig` from it.
///
/// An explicitly requested profile must exist. Without one, a missing
/// default profile is fine as long as flags or env supply the API key.
pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<ResolvedProfile, CliError> {
    let name = active_profile_name(global, config);

    let profile = match config.profiles.get(&name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                available: available_profiles(config),
                name,
            });
        }
        None => Profile::default(),
    };

    let publisher = resolve_profile(&profile, &name, global, config.defaults.timeout)?;
    Ok(ResolvedProfile {
        name,
        profile,
        publisher,
    })
}

/// Translate a `Profile` + global flags into a `PublisherConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    default_timeout: u64,
) -> Result<PublisherConfig, CliError> {
    let api_key = resolve_api_key_with_flag(profile, profile_name, global)?;
    let mut publisher =
        tiiny_config::profile_to_publisher_config(profile, api_key, default_timeout)?;

    if let Some(url) = &global.api_url {
        url::Url::parse(url).map_err(|e| CliError::Validation {
            field: "api-url".into(),
            reason: format!("{e}: {url}"),
        })?;
        publisher.api_url.clone_from(url);
    }
    if global.insecure {
        publisher.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        publisher.timeout = std::time::Duration::from_secs(secs);
    }

    Ok(publisher)
}

/// Comma-separated profile names for error help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Resolve API key with CLI flag override, then fall through to shared resolution.
fn resolve_api_key_with_flag(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    // CLI flag (or TIINY_API_KEY) takes priority
    if let Some(key) = global.api_key.as_deref().filter(|k| !k.is_empty()) {
        return Ok(SecretString::from(key.to_owned()));
    }
    Ok(tiiny_config::resolve_api_key(profile, profile_name)?)
}
