use serde_json::Value;

/// Password protection for a site, sent as an embedded JSON string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteSettings {
    pub password_protected: bool,
    pub password: String,
}

impl SiteSettings {
    pub fn new(password_protected: bool, password: impl Into<String>) -> Self {
        Self {
            password_protected,
            password: password.into(),
        }
    }

    /// `{"passwordProtected":<bool>,"password":"<password>"}`, keys in that order.
    pub fn encode(&self) -> String {
        encode_site_settings(self.password_protected, &self.password)
    }
}

/// Encode password settings the way the upload endpoint expects them.
pub fn encode_site_settings(password_protected: bool, password: &str) -> String {
    // Value's Display gives standard JSON string escaping.
    let password = Value::from(password);
    format!(r#"{{"passwordProtected":{password_protected},"password":{password}}}"#)
}
