// ── Existing-file lookup ──
//
// The upload endpoint needs every prior file named explicitly on
// re-upload, so updates always query the site first.

use serde_json::Value;
use tiiny_api::{RemoteFile, TiinyClient};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::normalize::unwrap_envelope;

/// Fetch the files currently stored on `link`.
///
/// Errors propagate unchanged; the lookup is never retried.
pub async fn fetch_existing_files(
    client: &TiinyClient,
    link: &str,
) -> Result<Vec<RemoteFile>, CoreError> {
    let body = unwrap_envelope(client.get_site(link).await?.into_body());
    let files = existing_files(&body);
    debug!(link, count = files.len(), "existing files");
    Ok(files)
}

/// Pull `{id, size}` pairs out of a `/get-site` body.
///
/// A missing or non-array `files` yields nothing. Entries need a string or
/// numeric `id` and a numeric `size`; both are kept as sent. Anything else
/// is skipped.
pub fn existing_files(body: &Value) -> Vec<RemoteFile> {
    let Some(files) = body.get("files").and_then(Value::as_array) else {
        return Vec::new();
    };

    files
        .iter()
        .filter_map(|entry| {
            let file = remote_file(entry);
            if file.is_none() {
                warn!(%entry, "skipping malformed file entry");
            }
            file
        })
        .collect()
}

fn remote_file(entry: &Value) -> Option<RemoteFile> {
    let id = match entry.get("id")? {
        id @ (Value::String(_) | Value::Number(_)) => id.clone(),
        _ => return None,
    };
    let Value::Number(size) = entry.get("size")? else {
        return None;
    };
    Some(RemoteFile {
        id,
        size: size.clone(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::upload::removal_list;

    fn remote(id: impl Into<Value>, size: u64) -> RemoteFile {
        RemoteFile {
            id: id.into(),
            size: size.into(),
        }
    }

    #[test]
    fn reads_files() {
        let body = json!({
            "files": [
                { "id": "a", "size": 10, "name": "index.html" },
                { "id": "b", "size": 20 }
            ]
        });
        assert_eq!(
            existing_files(&body),
            vec![remote("a", 10), remote("b", 20)]
        );
    }

    #[test]
    fn absent_or_malformed_files_are_empty() {
        assert!(existing_files(&json!({})).is_empty());
        assert!(existing_files(&json!({ "files": null })).is_empty());
        assert!(existing_files(&json!({ "files": "nope" })).is_empty());
        assert!(existing_files(&json!("text body")).is_empty());
        assert!(existing_files(&Value::Null).is_empty());
    }

    #[test]
    fn bad_entries_are_skipped() {
        let body = json!({
            "files": [
                { "id": 7, "size": 1 },
                { "id": "x" },
                { "size": 3 },
                "loose",
                { "id": "y", "size": "big" },
                { "id": null, "size": 2 }
            ]
        });
        assert_eq!(existing_files(&body), vec![remote(7, 1)]);
    }

    #[test]
    fn any_numeric_size_is_removed_as_sent() {
        let body = json!({
            "files": [
                { "id": 7, "size": 10 },
                { "id": "b", "size": 20.0 },
                { "id": "c", "size": 1.5e3 }
            ]
        });
        assert_eq!(
            removal_list(&existing_files(&body)),
            vec![
                r#"{"id":7,"size":10}"#,
                r#"{"id":"b","size":20.0}"#,
                r#"{"id":"c","size":1500.0}"#,
            ]
        );
    }
}
