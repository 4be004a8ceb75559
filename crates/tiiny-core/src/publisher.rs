// ── Publisher ──
//
// Routes one item to its site operation. Create and update share the
// upload path; update always lists the site's current files first so the
// upload can name them for removal.

use serde_json::Value;
use tiiny_api::{FileUpload, TiinyClient};
use tracing::{debug, info, warn};

use crate::config::PublisherConfig;
use crate::error::CoreError;
use crate::item::{Item, SiteParams};
use crate::link::SiteLink;
use crate::normalize::{normalize_create, unwrap_envelope};
use crate::operation::Operation;
use crate::query::fetch_existing_files;
use crate::settings::SiteSettings;
use crate::suffix::{default_suffixes, merge_suffixes};
use crate::upload::{build_create, build_update};

/// Entry point for site operations.
///
/// Holds one HTTP client reused for every item it processes.
#[derive(Debug, Clone)]
pub struct Publisher {
    client: TiinyClient,
}

impl Publisher {
    /// Build the HTTP client described by `config`. Does not contact the
    /// service; call [`verify_credentials`](Self::verify_credentials) for that.
    pub fn new(config: &PublisherConfig) -> Result<Self, CoreError> {
        let client =
            TiinyClient::from_api_key(&config.api_url, &config.api_key, &config.transport())?;
        Ok(Self { client })
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Run the named operation against `item`.
    pub async fn dispatch(&self, operation: &str, item: &Item) -> Result<Value, CoreError> {
        let operation = Operation::parse(operation)?;
        self.dispatch_operation(operation, item).await
    }

    pub async fn dispatch_operation(
        &self,
        operation: Operation,
        item: &Item,
    ) -> Result<Value, CoreError> {
        debug!(%operation, "dispatching");
        match operation {
            Operation::Create | Operation::CreateHtml => self.create(operation, item).await,
            Operation::Update | Operation::UpdateHtml => self.update(operation, item).await,
            Operation::Delete => self.delete(&item.params).await,
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Upload a new site and return `{link, fileName, ...response}`.
    pub async fn create(&self, operation: Operation, item: &Item) -> Result<Value, CoreError> {
        let params = &item.params;
        let file = file_for(operation, item)?;
        let file_name = file.filename.clone();

        let request = build_create(
            &params.subdomain,
            &params.domain_suffix,
            &settings_for(params),
            file,
        );
        let response = self.client.upload(&request).await?;
        let output = normalize_create(response.into_body(), &file_name)?;

        let link = output.get("link").and_then(Value::as_str).unwrap_or_default();
        info!(link, file = %file_name, "site created");
        Ok(output)
    }

    /// Replace the contents of an existing site.
    ///
    /// The link is validated and the file resolved before any request is
    /// made; the file listing always completes before the upload starts.
    pub async fn update(&self, operation: Operation, item: &Item) -> Result<Value, CoreError> {
        let params = &item.params;
        let raw_link = params.require_link()?;
        let link = SiteLink::parse(raw_link)?;
        let file = file_for(operation, item)?;

        let existing = fetch_existing_files(&self.client, raw_link).await?;
        let request = build_update(&link, &settings_for(params), file, &existing);
        let response = self.client.upload(&request).await?;

        info!(%link, removed = existing.len(), "site updated");
        Ok(unwrap_envelope(response.into_body()))
    }

    /// Delete the site at `params.link`.
    pub async fn delete(&self, params: &SiteParams) -> Result<Value, CoreError> {
        let link = params.require_link()?;
        let response = self.client.delete_site(link).await?;

        info!(link, "site deleted");
        Ok(unwrap_envelope(response.into_body()))
    }

    // ── Account ──────────────────────────────────────────────────────

    /// Check the API key against `/profile`.
    pub async fn verify_credentials(&self) -> Result<(), CoreError> {
        match self.client.verify().await {
            Ok(()) => Ok(()),
            Err(tiiny_api::Error::InvalidApiKey { status, .. }) => {
                Err(CoreError::AuthenticationFailed {
                    message: format!("API key rejected (HTTP {status})"),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Default suffixes plus the account's custom domains.
    pub async fn lookup_suffixes(&self) -> Result<Vec<String>, CoreError> {
        let profile = self.client.profile().await?;
        Ok(merge_suffixes(profile.custom_domains()))
    }

    /// Like [`lookup_suffixes`](Self::lookup_suffixes), but any failure
    /// yields the default list.
    pub async fn domain_suffixes(&self) -> Vec<String> {
        match self.lookup_suffixes().await {
            Ok(suffixes) => suffixes,
            Err(e) => {
                warn!(error = %e, "custom domain lookup failed, using default suffixes");
                default_suffixes()
            }
        }
    }
}

fn settings_for(params: &SiteParams) -> SiteSettings {
    SiteSettings::new(params.password_protected, params.password.as_str())
}

/// The file to upload: inline HTML for the html variants, otherwise the
/// named binary attachment.
fn file_for(operation: Operation, item: &Item) -> Result<FileUpload, CoreError> {
    if operation.uses_html() {
        return Ok(FileUpload::from_html(item.params.require_html()?));
    }

    let binary = item.binary(&item.params.binary_property_name)?;
    Ok(FileUpload::from_bytes(
        binary.file_name.as_deref(),
        &binary.data,
    ))
}
