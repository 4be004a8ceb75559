// ── Response normalization ──
//
// Responses may arrive as a bare body or wrapped in a full-response
// envelope (`{statusCode, headers, body}`); both are reduced to the body
// before anything else looks at them.

use serde_json::{Map, Value};

use crate::error::CoreError;

/// Strip a full-response envelope if there is one.
pub fn unwrap_envelope(response: Value) -> Value {
    match response {
        Value::Object(mut map)
            if map.contains_key("body")
                && (map.contains_key("statusCode") || map.contains_key("headers")) =>
        {
            map.remove("body").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Find the site link in a create response: `link`, then `data.link`.
pub fn extract_link(response: &Value) -> Option<&str> {
    let direct = response.get("link").and_then(Value::as_str);
    let nested = || {
        response
            .get("data")
            .and_then(|d| d.get("link"))
            .and_then(Value::as_str)
    };
    direct
        .filter(|l| !l.is_empty())
        .or_else(|| nested().filter(|l| !l.is_empty()))
}

/// Shape a create response into `{link, fileName, ...response}`.
///
/// Fails with [`CoreError::MissingLink`] when the service returned no link.
pub fn normalize_create(response: Value, file_name: &str) -> Result<Value, CoreError> {
    let response = unwrap_envelope(response);
    let link = extract_link(&response)
        .ok_or(CoreError::MissingLink)?
        .to_owned();

    let mut out = Map::new();
    out.insert("link".into(), Value::String(link));
    out.insert("fileName".into(), Value::String(file_name.to_owned()));

    match response {
        Value::Object(fields) => {
            for (key, value) in fields {
                out.entry(key).or_insert(value);
            }
        }
        other => {
            out.insert("originalResponse".into(), other);
        }
    }

    Ok(Value::Object(out))
}
