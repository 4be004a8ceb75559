use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Header carrying the account API key on every request.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Build the default header map holding the API key.
///
/// The value is marked sensitive so it never shows up in debug output.
pub fn api_key_headers(api_key: &SecretString) -> Result<HeaderMap, Error> {
    let key = api_key.expose_secret();
    if key.trim().is_empty() {
        return Err(Error::Authentication {
            message: "API key is empty".into(),
        });
    }

    let mut value = HeaderValue::from_str(key).map_err(|e| Error::Authentication {
        message: format!("invalid API key header value: {e}"),
    })?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, value);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn header_is_sensitive() {
        let headers = api_key_headers(&SecretString::from("k-123")).unwrap();
        let value = headers.get(API_KEY_HEADER).unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "k-123");
    }

    #[test]
    fn empty_key_rejected() {
        let err = api_key_headers(&SecretString::from("  ")).unwrap_err();
        assert!(matches!(err, Error::Authentication { .. }));
    }

    #[test]
    fn newline_in_key_rejected() {
        let err = api_key_headers(&SecretString::from("abc\ndef")).unwrap_err();
        assert!(matches!(err, Error::Authentication { .. }));
    }
}
