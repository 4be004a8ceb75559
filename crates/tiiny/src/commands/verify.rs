//! Verify command: check the API key against the account endpoint.

use tiiny_core::Publisher;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub async fn handle(
    publisher: &Publisher,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    publisher
        .verify_credentials()
        .await
        .map_err(|e| CliError::from(e).with_profile(profile_name))?;

    if !global.quiet {
        eprintln!("✓ API key accepted (profile '{profile_name}')");
    }
    Ok(())
}
