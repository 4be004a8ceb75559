//! Suffixes command: domain suffixes the account can publish under.

use serde::Serialize;
use tabled::Tabled;
use tiiny_core::{DEFAULT_DOMAIN_SUFFIXES, Publisher};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct SuffixEntry {
    suffix: String,
    custom: bool,
}

#[derive(Tabled)]
struct SuffixRow {
    #[tabled(rename = "Suffix")]
    suffix: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
}

impl From<&SuffixEntry> for SuffixRow {
    fn from(e: &SuffixEntry) -> Self {
        Self {
            suffix: e.suffix.clone(),
            kind: if e.custom { "custom" } else { "built-in" },
        }
    }
}

pub async fn handle(publisher: &Publisher, global: &GlobalOpts) -> Result<(), CliError> {
    let entries: Vec<SuffixEntry> = publisher
        .domain_suffixes()
        .await
        .into_iter()
        .map(|suffix| SuffixEntry {
            custom: !DEFAULT_DOMAIN_SUFFIXES.contains(&suffix.as_str()),
            suffix,
        })
        .collect();

    let out = output::render_list(
        &global.output,
        &entries,
        |e| SuffixRow::from(e),
        |e| e.suffix.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
