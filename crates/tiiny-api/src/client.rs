// Async HTTP client for the Tiiny Host external publishing API.
//
// Base path: /v3/external/pub/
// Auth: X-Api-Key header

use reqwest::multipart::Form;
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::api_key_headers;
use crate::error::Error;
use crate::models::ApiResponse;
use crate::transport::TransportConfig;

/// Default API host.
pub const DEFAULT_API_URL: &str = "https://api.tiiny.host";

/// Path prefix every publishing endpoint lives under.
pub const API_PREFIX: &str = "/v3/external/pub";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the publishing API.
///
/// Every request carries the account API key. Endpoint methods live in
/// `sites.rs` and `profile.rs`; this module handles URLs and responses.
#[derive(Debug, Clone)]
pub struct TiinyClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TiinyClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// Injects `X-Api-Key` as a default header on every request.
    pub fn from_api_key(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let headers = api_key_headers(api_key)?;
        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Build the base URL ending in `/v3/external/pub/`.
    ///
    /// Accepts the bare host (`https://api.tiiny.host`), the versioned root
    /// (`https://api.tiiny.host/v3`), or the full prefix.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with(API_PREFIX) {
            url.set_path(&format!("{path}/"));
        } else if path.ends_with("/v3") {
            url.set_path(&format!("{path}/external/pub/"));
        } else {
            url.set_path(&format!("{path}{API_PREFIX}/"));
        }

        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join an endpoint name (e.g. `"upload"`) onto the base URL.
    fn url(&self, endpoint: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get_with_params(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<ApiResponse, Error> {
        let url = self.url(endpoint)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        handle_response(endpoint, resp).await
    }

    pub(crate) async fn post_json<B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<ApiResponse, Error> {
        let url = self.url(endpoint)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        handle_response(endpoint, resp).await
    }

    pub(crate) async fn post_empty(&self, endpoint: &str) -> Result<ApiResponse, Error> {
        let url = self.url(endpoint)?;
        debug!("POST {url}");

        let resp = self.http.post(url).send().await?;
        handle_response(endpoint, resp).await
    }

    pub(crate) async fn post_multipart(
        &self,
        endpoint: &str,
        form: Form,
    ) -> Result<ApiResponse, Error> {
        let url = self.url(endpoint)?;
        debug!("POST {url} (multipart)");

        let resp = self.http.post(url).multipart(form).send().await?;
        handle_response(endpoint, resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

/// Turn a response into an [`ApiResponse`], or an error for non-2xx.
///
/// Empty bodies become `null`; bodies that aren't JSON are kept as strings.
async fn handle_response(endpoint: &str, resp: reqwest::Response) -> Result<ApiResponse, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(parse_error(endpoint, status, resp).await);
    }

    let raw = resp.text().await?;
    let body = if raw.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&raw).unwrap_or(Value::String(raw))
    };

    Ok(ApiResponse {
        status: status.as_u16(),
        body,
    })
}

async fn parse_error(endpoint: &str, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let endpoint = format!("/{}", endpoint.trim_start_matches('/'));

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Error::InvalidApiKey {
            endpoint,
            status: status.as_u16(),
        };
    }

    let raw = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&raw)
        .ok()
        .and_then(|e| e.message.or(e.error))
        .unwrap_or_else(|| {
            if raw.trim().is_empty() {
                status.to_string()
            } else {
                raw.chars().take(200).collect()
            }
        });

    Error::Api {
        endpoint,
        status: status.as_u16(),
        message,
    }
}

/// Decode a typed body out of an [`ApiResponse`].
pub(crate) fn decode<T: DeserializeOwned>(resp: &ApiResponse) -> Result<T, Error> {
    T::deserialize(&resp.body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: resp.body.to_string(),
    })
}
