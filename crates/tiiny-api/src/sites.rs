// Site endpoints: upload (create/update), get-site, delete.

use serde_json::json;
use tracing::debug;

use crate::client::TiinyClient;
use crate::error::Error;
use crate::models::ApiResponse;
use crate::upload::UploadRequest;

impl TiinyClient {
    /// Create or update a site.
    ///
    /// `POST /upload` (multipart)
    pub async fn upload(&self, request: &UploadRequest) -> Result<ApiResponse, Error> {
        debug!(
            domain = request.domain.as_deref().unwrap_or("<assigned>"),
            suffix = %request.domain_suffix,
            file = %request.files_to_add.filename,
            update = request.is_update,
            removing = request.files_to_remove.as_ref().map_or(0, Vec::len),
            "uploading site"
        );
        self.post_multipart("upload", request.to_form()).await
    }

    /// Fetch a site's current metadata, including its file list.
    ///
    /// `GET /get-site?domain={link}`
    pub async fn get_site(&self, link: &str) -> Result<ApiResponse, Error> {
        debug!(link, "fetching site");
        self.get_with_params("get-site", &[("domain", link)]).await
    }

    /// Delete a site.
    ///
    /// `POST /delete` with `{"link": "..."}`
    pub async fn delete_site(&self, link: &str) -> Result<ApiResponse, Error> {
        debug!(link, "deleting site");
        self.post_json("delete", &json!({ "link": link })).await
    }
}
