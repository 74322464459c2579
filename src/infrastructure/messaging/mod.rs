use std::sync::Arc;

use tracing::info;

use crate::application::services::network::ChatNetworkClient;
use crate::config::{Config, Provider};

pub mod bridge;
pub mod events;
pub mod mock;

pub use bridge::BridgeClient;
pub use events::BridgeEventWorker;
pub use mock::MockChatClient;

/// Create the network client selected by configuration.
pub fn create_network_client(config: &Config) -> anyhow::Result<Arc<dyn ChatNetworkClient>> {
    match config.provider {
        Provider::Bridge => {
            info!(url = %config.bridge_url, "using sidecar bridge network client");
            Ok(BridgeClient::new(config)?)
        }
        Provider::Mock => {
            info!("using mock network client, messages are logged only");
            Ok(MockChatClient::new())
        }
    }
}
