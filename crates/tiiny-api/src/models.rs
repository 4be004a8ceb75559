// Wire types for the publishing API.
//
// Upload and delete responses are passed through untyped; only the pieces
// the client actually reads (remote files, account profile) get structs.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A response body together with the status it arrived with.
///
/// The service answers with JSON on success; anything else is kept as a
/// string body so callers still see what came back.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// Drop the status and keep the body.
    pub fn into_body(self) -> Value {
        self.body
    }
}

/// A file already stored on a site, as listed by `/get-site`.
///
/// Only the fields needed to request its removal are kept, exactly as the
/// service sent them: `id` may be a string or a number, `size` any number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub id: Value,
    pub size: Number,
}

/// Body of `POST /profile`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub profile: Option<AccountProfile>,
}

impl ProfileResponse {
    /// Custom domains attached to the account, empty when none are listed.
    pub fn custom_domains(&self) -> Vec<&str> {
        self.profile
            .as_ref()
            .map(|p| p.custom_domains.iter().filter_map(CustomDomain::name).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    #[serde(default)]
    pub custom_domains: Vec<CustomDomain>,
}

/// A custom domain entry. The service has listed these both as bare
/// strings and as objects carrying a `domain` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CustomDomain {
    Name(String),
    Entry {
        #[serde(default)]
        domain: Option<String>,
    },
}

impl CustomDomain {
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            Self::Name(name) => Some(name.as_str()),
            Self::Entry { domain } => domain.as_deref(),
        }?;
        let name = name.trim();
        (!name.is_empty()).then_some(name)
    }
}
