// ── Work items ──
//
// One item per site operation. Parameters come from the caller (CLI
// flags, a batch file); binary attachments are resolved by the caller
// and handed in by name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Binary property looked up when none is named.
pub const DEFAULT_BINARY_PROPERTY: &str = "data";

/// Domain suffix used when none is given.
pub const DEFAULT_DOMAIN_SUFFIX: &str = ".tiiny.site";

/// Per-item parameters, deserialized from camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteParams {
    /// Overrides the batch-wide operation for this item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    pub binary_property_name: String,
    pub subdomain: String,
    pub domain_suffix: String,
    pub password_protected: bool,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Default for SiteParams {
    fn default() -> Self {
        Self {
            operation: None,
            binary_property_name: DEFAULT_BINARY_PROPERTY.into(),
            subdomain: String::new(),
            domain_suffix: DEFAULT_DOMAIN_SUFFIX.into(),
            password_protected: false,
            password: String::new(),
            html_content: None,
            link: None,
        }
    }
}

impl SiteParams {
    /// The target link, required by update and delete.
    pub fn require_link(&self) -> Result<&str, CoreError> {
        require("link", self.link.as_deref())
    }

    /// Inline HTML, required by the html variants.
    pub fn require_html(&self) -> Result<&str, CoreError> {
        require("htmlContent", self.html_content.as_deref())
    }
}

fn require<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CoreError::MissingParameter { name: name.into() })
}

/// A binary attachment: file bytes plus the metadata that came with them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryData {
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}

impl BinaryData {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            data,
        }
    }
}

/// A single unit of work: parameters plus named binary attachments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub params: SiteParams,
    pub binary: BTreeMap<String, BinaryData>,
}

impl Item {
    pub fn new(params: SiteParams) -> Self {
        Self {
            params,
            binary: BTreeMap::new(),
        }
    }

    /// Attach a binary under `name`.
    pub fn with_binary(mut self, name: impl Into<String>, data: BinaryData) -> Self {
        self.binary.insert(name.into(), data);
        self
    }

    /// Look up an attachment, failing when the item doesn't carry it.
    pub fn binary(&self, name: &str) -> Result<&BinaryData, CoreError> {
        self.binary
            .get(name)
            .ok_or_else(|| CoreError::MissingBinaryData {
                property: name.into(),
            })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn params_defaults_fill_missing_keys() {
        let params: SiteParams = serde_json::from_value(json!({ "subdomain": "mysite" })).unwrap();
        assert_eq!(params.subdomain, "mysite");
        assert_eq!(params.binary_property_name, "data");
        assert_eq!(params.domain_suffix, ".tiiny.site");
        assert!(!params.password_protected);
        assert_eq!(params.operation, None);
    }

    #[test]
    fn params_read_camel_case() {
        let params: SiteParams = serde_json::from_value(json!({
            "operation": "updateHtml",
            "link": "foo.tiiny.site",
            "htmlContent": "<p>hi</p>",
            "passwordProtected": true,
            "password": "pw",
            "binaryPropertyName": "site"
        }))
        .unwrap();
        assert_eq!(params.operation.as_deref(), Some("updateHtml"));
        assert_eq!(params.require_link().unwrap(), "foo.tiiny.site");
        assert_eq!(params.require_html().unwrap(), "<p>hi</p>");
        assert!(params.password_protected);
        assert_eq!(params.binary_property_name, "site");
    }

    #[test]
    fn blank_required_params_are_missing() {
        let params = SiteParams {
            link: Some("  ".into()),
            ..SiteParams::default()
        };
        assert!(matches!(
            params.require_link(),
            Err(CoreError::MissingParameter { ref name }) if name == "link"
        ));
        assert!(matches!(
            params.require_html(),
            Err(CoreError::MissingParameter { ref name }) if name == "htmlContent"
        ));
    }

    #[test]
    fn missing_binary_names_property() {
        let item = Item::new(SiteParams::default());
        let err = item.binary("data").unwrap_err();
        assert_eq!(err.to_string(), "No binary data property 'data' found");
    }

    #[test]
    fn binary_lookup_by_name() {
        let item = Item::default().with_binary("site", BinaryData::new("site.zip", vec![1, 2]));
        assert_eq!(item.binary("site").unwrap().data, vec![1, 2]);
    }
}
