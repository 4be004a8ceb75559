// Multipart body for `POST /upload`.
//
// Field names and encodings follow the service contract:
//   domain?        full site link (subdomain + suffix)
//   domainSuffix   e.g. ".tiiny.site"
//   siteSettings   JSON string {"passwordProtected":..,"password":..}
//   filesToAdd     base64 text part with a filename
//   filesToRemove? one JSON string {"id":..,"size":..} per part
//   isUpdate?      "true"

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};

/// Name of the HTML file used for inline content uploads.
pub const HTML_FILE_NAME: &str = "index.html";

/// Filename used when a binary attachment carries none.
pub const FALLBACK_FILE_NAME: &str = "file";

/// A single file to upload, already base64-encoded.
///
/// The content travels as a text part, so raw bytes would be mangled by
/// charset handling on the way; base64 keeps archives and PDFs intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub content_base64: String,
}

impl FileUpload {
    /// Encode raw bytes from a binary attachment.
    pub fn from_bytes(filename: Option<&str>, bytes: &[u8]) -> Self {
        let filename = filename
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_FILE_NAME);
        Self {
            filename: filename.to_owned(),
            content_base64: BASE64_STANDARD.encode(bytes),
        }
    }

    /// Wrap inline HTML as a single `index.html` file.
    pub fn from_html(html: &str) -> Self {
        Self {
            filename: HTML_FILE_NAME.to_owned(),
            content_base64: BASE64_STANDARD.encode(html.as_bytes()),
        }
    }

    fn to_part(&self) -> Part {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Content-Transfer-Encoding",
            HeaderValue::from_static("base64"),
        );
        Part::text(self.content_base64.clone())
            .file_name(self.filename.clone())
            .headers(headers)
    }
}

/// One named part of the upload form, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField<'a> {
    Text { name: &'static str, value: &'a str },
    File { name: &'static str, file: &'a FileUpload },
}

/// Everything `POST /upload` needs for a create or an update.
///
/// Built fresh per operation and dropped once the request returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub domain: Option<String>,
    pub domain_suffix: String,
    pub site_settings: String,
    pub files_to_add: FileUpload,
    pub files_to_remove: Option<Vec<String>>,
    pub is_update: bool,
}

impl UploadRequest {
    /// The form fields in the order they are sent.
    pub fn fields(&self) -> Vec<FormField<'_>> {
        let mut fields = Vec::with_capacity(6);

        if self.is_update {
            fields.push(FormField::Text {
                name: "isUpdate",
                value: "true",
            });
        }
        if let Some(ref domain) = self.domain {
            fields.push(FormField::Text {
                name: "domain",
                value: domain,
            });
        }
        fields.push(FormField::Text {
            name: "domainSuffix",
            value: &self.domain_suffix,
        });
        fields.push(FormField::Text {
            name: "siteSettings",
            value: &self.site_settings,
        });
        fields.push(FormField::File {
            name: "filesToAdd",
            file: &self.files_to_add,
        });
        if let Some(ref remove) = self.files_to_remove {
            for entry in remove {
                fields.push(FormField::Text {
                    name: "filesToRemove",
                    value: entry,
                });
            }
        }

        fields
    }

    /// Encode into a multipart form ready for sending.
    pub fn to_form(&self) -> Form {
        self.fields()
            .into_iter()
            .fold(Form::new(), |form, field| match field {
                FormField::Text { name, value } => form.text(name, value.to_owned()),
                FormField::File { name, file } => form.part(name, file.to_part()),
            })
    }
}
