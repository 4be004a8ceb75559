// tiiny-core: Site operations on top of tiiny-api, item by item.

pub mod batch;
pub mod config;
pub mod error;
pub mod item;
pub mod link;
pub mod normalize;
pub mod operation;
pub mod publisher;
pub mod query;
pub mod settings;
pub mod suffix;
pub mod upload;

// ── Primary re-exports ──────────────────────────────────────────────
pub use batch::{BatchOptions, FailureMode, OutputItem};
pub use config::{PublisherConfig, TlsVerification};
pub use error::{CoreError, ItemError};
pub use item::{BinaryData, DEFAULT_BINARY_PROPERTY, DEFAULT_DOMAIN_SUFFIX, Item, SiteParams};
pub use link::SiteLink;
pub use operation::Operation;
pub use publisher::Publisher;
pub use settings::{SiteSettings, encode_site_settings};
pub use suffix::DEFAULT_DOMAIN_SUFFIXES;

// Wire types callers need when building items or clients by hand.
pub use tiiny_api::{DEFAULT_API_URL, FileUpload, RemoteFile, TiinyClient};
