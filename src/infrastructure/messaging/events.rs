//! Long-poll worker translating bridge events into connection lifecycle
//! messages and inbound auto-replies.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::application::handlers::connection::ConnectionHandle;
use crate::application::handlers::inbound::InboundHandler;
use crate::application::services::network::ChatNetworkClient;
use crate::application::services::router::AutoReplyRouter;
use crate::config::Config;
use crate::domain::models::{ClientInfo, InboundMessage, LifecycleEvent};

const POLL_BACKOFF: Duration = Duration::from_secs(3);

/// Wire format of the bridge's `/events` long-poll.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum BridgeEvent {
    PairingCode {
        code: String,
    },
    Ready {
        phone: String,
        name: String,
        platform: String,
    },
    AuthFailure {
        message: String,
    },
    Disconnected {
        reason: Option<String>,
    },
    Message {
        from: String,
        body: String,
        contact_name: Option<String>,
    },
}

pub struct BridgeEventWorker {
    http: Client,
    base_url: String,
    token: Option<String>,
    poll_timeout: Duration,
    handle: ConnectionHandle,
    inbound: InboundHandler,
}

impl BridgeEventWorker {
    pub fn new(
        config: &Config,
        handle: ConnectionHandle,
        router: AutoReplyRouter,
        client: Arc<dyn ChatNetworkClient>,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent("farmlink-gateway/events")
            // the bridge holds the request open up to the poll timeout
            .timeout(config.event_poll_timeout + Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: config.bridge_url.trim_end_matches('/').to_string(),
            token: config.bridge_token.clone(),
            poll_timeout: config.event_poll_timeout,
            handle,
            inbound: InboundHandler::new(router, client),
        })
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        loop {
            match self.poll_once().await {
                Ok(events) => {
                    for event in events {
                        self.process_event(event).await;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "event poll failed, backing off");
                    tokio::time::sleep(POLL_BACKOFF).await;
                }
            }
        }
    }

    async fn poll_once(&self) -> anyhow::Result<Vec<BridgeEvent>> {
        let mut request = self
            .http
            .get(format!("{}/events", self.base_url))
            .query(&[("wait", self.poll_timeout.as_secs())]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let bytes = request.send().await?.bytes().await?;
        let events = serde_json::from_slice(&bytes)?;
        Ok(events)
    }

    async fn process_event(&self, event: BridgeEvent) {
        match event {
            BridgeEvent::PairingCode { code } => {
                self.handle
                    .lifecycle(LifecycleEvent::PairingCode(code))
                    .await;
            }
            BridgeEvent::Ready {
                phone,
                name,
                platform,
            } => {
                self.handle
                    .lifecycle(LifecycleEvent::Ready(ClientInfo {
                        phone,
                        name,
                        platform,
                    }))
                    .await;
            }
            BridgeEvent::AuthFailure { message } => {
                self.handle
                    .lifecycle(LifecycleEvent::AuthFailure(message))
                    .await;
            }
            BridgeEvent::Disconnected { reason } => {
                self.handle
                    .lifecycle(LifecycleEvent::Disconnected { reason })
                    .await;
            }
            BridgeEvent::Message {
                from,
                body,
                contact_name,
            } => {
                self.inbound
                    .handle(InboundMessage {
                        sender: from,
                        body,
                        contact_name,
                    })
                    .await;
            }
        }
    }
}
