// ── Upload request building ──
//
// Pure translation from site parameters to the `/upload` body. The same
// builders serve binary and inline-HTML sources; they only see the
// already-encoded `FileUpload`.

use serde_json::json;
use tiiny_api::{FileUpload, RemoteFile, UploadRequest};

use crate::link::SiteLink;
use crate::settings::SiteSettings;

/// Build the body for creating a new site.
///
/// `domain` is sent only when the subdomain has something besides
/// whitespace; otherwise the service assigns a link itself.
pub fn build_create(
    subdomain: &str,
    domain_suffix: &str,
    settings: &SiteSettings,
    file: FileUpload,
) -> UploadRequest {
    let domain = (!subdomain.trim().is_empty()).then(|| format!("{subdomain}{domain_suffix}"));

    UploadRequest {
        domain,
        domain_suffix: domain_suffix.to_owned(),
        site_settings: settings.encode(),
        files_to_add: file,
        files_to_remove: None,
        is_update: false,
    }
}

/// Build the body for re-uploading an existing site.
///
/// Every file currently on the site is listed for removal; an empty
/// listing leaves `filesToRemove` out entirely.
pub fn build_update(
    link: &SiteLink,
    settings: &SiteSettings,
    file: FileUpload,
    existing: &[RemoteFile],
) -> UploadRequest {
    let files_to_remove = (!existing.is_empty()).then(|| removal_list(existing));

    UploadRequest {
        domain: Some(link.domain()),
        domain_suffix: link.domain_suffix.clone(),
        site_settings: settings.encode(),
        files_to_add: file,
        files_to_remove,
        is_update: true,
    }
}

/// One compact `{"id":..,"size":..}` string per remote file.
pub fn removal_list(existing: &[RemoteFile]) -> Vec<String> {
    existing
        .iter()
        .map(|f| json!({ "id": f.id, "size": f.size }).to_string())
        .collect()
}
