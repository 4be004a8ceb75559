// Account profile endpoint, doubling as the credential check.

use tracing::debug;

use crate::client::{TiinyClient, decode};
use crate::error::Error;
use crate::models::ProfileResponse;

impl TiinyClient {
    /// Fetch the account profile.
    ///
    /// `POST /profile`
    pub async fn profile(&self) -> Result<ProfileResponse, Error> {
        debug!("fetching profile");
        let resp = self.post_empty("profile").await?;
        decode(&resp)
    }

    /// Check that the API key is accepted.
    ///
    /// Succeeds on any 2xx from `POST /profile`; the body is not inspected.
    pub async fn verify(&self) -> Result<(), Error> {
        debug!("verifying API key");
        self.post_empty("profile").await.map(|_| ())
    }
}
