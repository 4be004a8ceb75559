//! Batch command: run many site operations from a file.
//!
//! Input is a JSON array of items or one JSON object per line. Each item
//! carries the site parameters (camelCase, as in the API) plus an optional
//! `binary` map naming files on disk:
//!
//! ```json
//! { "operation": "create", "subdomain": "docs",
//!   "binary": { "data": { "path": "dist/site.zip" } } }
//! ```
//!
//! Relative paths resolve against the input file's directory. All files are
//! read before the first request is sent.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tabled::Tabled;

use tiiny_core::{BatchOptions, BinaryData, FailureMode, Item, OutputItem, Publisher, SiteParams};

use crate::cli::{BatchArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Input format ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct BatchEntry {
    #[serde(flatten)]
    params: SiteParams,
    #[serde(default)]
    binary: BTreeMap<String, BinaryRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinaryRef {
    path: PathBuf,
    file_name: Option<String>,
}

/// Parse a JSON array, or NDJSON when the text doesn't start with `[`.
fn parse_entries(text: &str) -> Result<Vec<BatchEntry>, CliError> {
    if text.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(text)?);
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line).map_err(|e| CliError::Validation {
                field: format!("input line {}", n + 1),
                reason: e.to_string(),
            })
        })
        .collect()
}

fn load_item(entry: BatchEntry, base_dir: &Path) -> Result<Item, CliError> {
    let mut item = Item::new(entry.params);

    for (name, binary) in entry.binary {
        let path = if binary.path.is_relative() {
            base_dir.join(&binary.path)
        } else {
            binary.path.clone()
        };
        let data = util::read_bytes(&path)?;
        item = item.with_binary(
            name,
            BinaryData {
                file_name: binary.file_name.or_else(|| util::file_name_of(&binary.path)),
                data,
            },
        );
    }

    Ok(item)
}

fn load_items(input: &Path) -> Result<Vec<Item>, CliError> {
    let text = util::read_text(input)?;
    let base_dir = if util::is_stdin(input) {
        PathBuf::from(".")
    } else {
        input
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    };

    parse_entries(&text)?
        .into_iter()
        .map(|entry| load_item(entry, &base_dir))
        .collect()
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Result")]
    detail: String,
}

impl From<&OutputItem> for ResultRow {
    fn from(out: &OutputItem) -> Self {
        let (status, key) = if out.is_error() {
            ("error", "error")
        } else {
            ("ok", "link")
        };
        Self {
            index: out.paired_item,
            status,
            detail: out.json.get(key).map(output::scalar).unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    publisher: &Publisher,
    args: BatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let items = load_items(&args.input)?;
    let options = BatchOptions {
        operation: args.operation,
        on_failure: if args.continue_on_fail {
            FailureMode::Continue
        } else {
            FailureMode::Abort
        },
    };

    let progress = if global.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(u64::try_from(items.len()).unwrap_or(u64::MAX))
    };
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let result = publisher
        .execute_with(&items, &options, |out| {
            if out.is_error() {
                progress.set_message(format!("item {} failed", out.paired_item));
            }
            progress.inc(1);
        })
        .await;
    progress.finish_and_clear();

    let outputs = result?;
    let failed = outputs.iter().filter(|o| o.is_error()).count();

    let out = output::render_list(
        &global.output,
        &outputs,
        |o| ResultRow::from(o),
        |o| serde_json::to_string(&o.json).unwrap_or_default(),
    );
    output::print_output(&out, global.quiet);

    if failed > 0 && !global.quiet {
        eprintln!("{failed} of {} items failed", outputs.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_json_array() {
        let entries = parse_entries(
            r#"[ { "operation": "delete", "link": "a.tiiny.site" },
                 { "htmlContent": "<p/>", "subdomain": "b" } ]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].params.operation.as_deref(), Some("delete"));
        assert_eq!(entries[1].params.subdomain, "b");
        assert_eq!(entries[1].params.domain_suffix, ".tiiny.site");
    }

    #[test]
    fn parses_ndjson_and_reports_line() {
        let entries =
            parse_entries("{\"link\":\"a.tiiny.site\"}\n\n{\"link\":\"b.tiiny.site\"}\n").unwrap();
        assert_eq!(entries.len(), 2);

        let err = parse_entries("{\"link\":\"a\"}\nnot json\n").err().unwrap();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "input line 2"));
    }

    #[test]
    fn binary_paths_resolve_against_input_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("site.zip"), b"PK").unwrap();

        let entry: BatchEntry = serde_json::from_value(json!({
            "operation": "create",
            "binary": { "data": { "path": "site.zip" } }
        }))
        .unwrap();
        let item = load_item(entry, dir.path()).unwrap();

        let binary = item.binary("data").unwrap();
        assert_eq!(binary.data, b"PK");
        assert_eq!(binary.file_name.as_deref(), Some("site.zip"));
    }

    #[test]
    fn rows_show_link_or_error() {
        let ok = ResultRow::from(&OutputItem {
            json: json!({ "link": "x.tiiny.site" }),
            paired_item: 0,
        });
        assert_eq!((ok.status, ok.detail.as_str()), ("ok", "x.tiiny.site"));

        let failed = ResultRow::from(&OutputItem {
            json: json!({ "error": "boom" }),
            paired_item: 1,
        });
        assert_eq!((failed.status, failed.detail.as_str()), ("error", "boom"));
    }
}
