// tiiny-api: Async Rust client for the Tiiny Host publishing API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod profile;
pub mod sites;
pub mod transport;
pub mod upload;

pub use client::{API_PREFIX, DEFAULT_API_URL, TiinyClient};
pub use error::Error;
pub use models::{AccountProfile, ApiResponse, CustomDomain, ProfileResponse, RemoteFile};
pub use transport::{TlsMode, TransportConfig};
pub use upload::{FileUpload, FormField, HTML_FILE_NAME, UploadRequest};
