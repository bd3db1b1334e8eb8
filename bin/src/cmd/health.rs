//! Health command implementation.

use anyhow::{Result, bail};
use screener_quotes::QuoteClient;

/// Ping the backend and report whether it is up.
pub(crate) async fn check_health(client: &QuoteClient) -> Result<()> {
    if client.health().await? {
        println!("Backend at {} is healthy.", client.base_url());
        Ok(())
    } else {
        bail!("backend at {} answered but is not healthy", client.base_url())
    }
}
