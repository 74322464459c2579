use tokio::main;
use tracing::info;
use tracing_subscriber::EnvFilter;

use farmlink_gateway::application::services::gateway;
use farmlink_gateway::application::services::router::AutoReplyRouter;
use farmlink_gateway::config::{Config, Provider};
use farmlink_gateway::domain::models::LifecycleEvent;
use farmlink_gateway::infrastructure::messaging::{
    BridgeEventWorker, MockChatClient, create_network_client,
};

#[main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::try_parse()?;
    let client = create_network_client(&config)?;
    let (gateway, handle) = gateway::start(client.clone(), &config)?;

    gateway.initialize().await;

    match config.provider {
        Provider::Bridge => {
            let worker = BridgeEventWorker::new(
                &config,
                handle.clone(),
                AutoReplyRouter::default(),
                client,
            )?;
            worker.spawn();
        }
        Provider::Mock => {
            // Mock sessions skip pairing and come up ready.
            handle
                .lifecycle(LifecycleEvent::Ready(MockChatClient::client_info()))
                .await;
        }
    }

    info!("gateway running, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;
    info!(
        pending = gateway.pending_count().await,
        "shutting down, queued messages are not persisted"
    );
    Ok(())
}
