//! Clap derive structures for the `tiiny` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tiiny -- publish static sites from the command line
#[derive(Debug, Parser)]
#[command(
    name = "tiiny",
    version,
    about = "Publish, update, and delete static sites on Tiiny Host",
    long_about = "Upload a file or inline HTML as a static site, replace the contents of an\n\
        existing site, or delete it. Batches of operations can be read from a\n\
        JSON or NDJSON file.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use
    #[arg(long, short = 'p', env = "TIINY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root URL (overrides profile)
    #[arg(long, env = "TIINY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// API key
    #[arg(long, env = "TIINY_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TIINY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "TIINY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "TIINY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Publish a file as a new site
    #[command(alias = "c")]
    Create(CreateArgs),

    /// Publish inline HTML as a new site
    CreateHtml(CreateHtmlArgs),

    /// Replace the contents of an existing site with a file
    #[command(alias = "u")]
    Update(UpdateArgs),

    /// Replace the contents of an existing site with inline HTML
    UpdateHtml(UpdateHtmlArgs),

    /// Delete a site
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Run operations from a JSON or NDJSON file
    Batch(BatchArgs),

    /// List the domain suffixes available to the account
    Suffixes,

    /// Check that the API key is accepted
    Verify,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Site Arguments ────────────────────────────────────────────

/// Password protection for the published site.
#[derive(Debug, Args)]
pub struct ProtectionArgs {
    /// Protect the site with this password
    #[arg(long, env = "TIINY_SITE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Where a new site should live.
#[derive(Debug, Args)]
pub struct PlacementArgs {
    /// Subdomain to request (the service picks one when omitted)
    #[arg(long, short = 's')]
    pub subdomain: Option<String>,

    /// Domain suffix, e.g. `.tiiny.site` (defaults to the profile's)
    #[arg(long)]
    pub suffix: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SITES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// File to upload (HTML, PDF, ZIP archive, ...)
    pub file: PathBuf,

    /// Name to upload the file under (defaults to the file's name)
    #[arg(long)]
    pub file_name: Option<String>,

    #[command(flatten)]
    pub placement: PlacementArgs,

    #[command(flatten)]
    pub protection: ProtectionArgs,
}

#[derive(Debug, Args)]
pub struct CreateHtmlArgs {
    /// HTML source file, or `-` for stdin
    pub html: PathBuf,

    #[command(flatten)]
    pub placement: PlacementArgs,

    #[command(flatten)]
    pub protection: ProtectionArgs,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Site link, e.g. `mysite.tiiny.site`
    pub link: String,

    /// Replacement file
    pub file: PathBuf,

    /// Name to upload the file under (defaults to the file's name)
    #[arg(long)]
    pub file_name: Option<String>,

    #[command(flatten)]
    pub protection: ProtectionArgs,
}

#[derive(Debug, Args)]
pub struct UpdateHtmlArgs {
    /// Site link, e.g. `mysite.tiiny.site`
    pub link: String,

    /// HTML source file, or `-` for stdin
    pub html: PathBuf,

    #[command(flatten)]
    pub protection: ProtectionArgs,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Site link, e.g. `mysite.tiiny.site`
    pub link: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BATCH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Items file (JSON array or one object per line), or `-` for stdin
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Operation for items that don't set `operation` themselves
    #[arg(long, value_parser = ["create", "createHtml", "update", "updateHtml", "delete"])]
    pub operation: Option<String>,

    /// Record failed items as `{"error": ...}` and keep going
    #[arg(long)]
    pub continue_on_fail: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key, e.g. `default_suffix`
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an API key in the system keyring for the active profile
    SetKey,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
