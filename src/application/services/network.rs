use std::path::Path;

use async_trait::async_trait;

use crate::domain::phone::Address;

/// Seam to the chat network. The connection worker owns all session state;
/// implementations only perform the I/O.
#[async_trait]
pub trait ChatNetworkClient: Send + Sync {
    /// Begin the pairing handshake. Pairing completes out-of-band; progress
    /// arrives later as lifecycle events.
    async fn connect(&self) -> anyhow::Result<()>;

    /// Attempt exactly one delivery. An error here means this message is
    /// lost; retry policy, if any, belongs to the caller.
    async fn send(&self, to: &Address, body: &str, attachment: Option<&Path>)
    -> anyhow::Result<()>;
}
