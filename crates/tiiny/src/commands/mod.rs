//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod batch;
pub mod config_cmd;
pub mod sites;
pub mod suffixes;
pub mod util;
pub mod verify;

use tiiny_core::Publisher;

use crate::cli::{Command, GlobalOpts};
use crate::config::ResolvedProfile;
use crate::error::CliError;

/// Dispatch an account-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    publisher: &Publisher,
    resolved: &ResolvedProfile,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let suffix = resolved.profile.domain_suffix();

    let result = match cmd {
        Command::Create(args) => sites::create(publisher, args, suffix, global).await,
        Command::CreateHtml(args) => sites::create_html(publisher, args, suffix, global).await,
        Command::Update(args) => sites::update(publisher, args, global).await,
        Command::UpdateHtml(args) => sites::update_html(publisher, args, global).await,
        Command::Delete(args) => sites::delete(publisher, args, global).await,
        Command::Batch(args) => batch::handle(publisher, args, global).await,
        Command::Suffixes => suffixes::handle(publisher, global).await,
        Command::Verify => verify::handle(publisher, &resolved.name, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    };

    result.map_err(|e| e.with_profile(&resolved.name))
}
