//! HTTP client for the local sidecar bridge that holds the actual chat
//! network socket.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::application::services::network::ChatNetworkClient;
use crate::config::Config;
use crate::domain::phone::Address;

pub struct BridgeClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl BridgeClient {
    pub fn new(config: &Config) -> anyhow::Result<Arc<Self>> {
        let http = Client::builder()
            .user_agent("farmlink-gateway/bridge")
            .build()?;
        Ok(Arc::new(Self {
            http,
            base_url: config.bridge_url.trim_end_matches('/').to_string(),
            token: config.bridge_token.clone(),
        }))
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ChatNetworkClient for BridgeClient {
    async fn connect(&self) -> anyhow::Result<()> {
        let response = self
            .authorize(self.http.post(self.build_url("/session/connect")))
            .send()
            .await?;
        let ack: BridgeAck = response.json().await?;
        if !ack.ok {
            anyhow::bail!(
                "bridge refused to start pairing: {}",
                ack.description
                    .unwrap_or_else(|| "unknown error".to_string())
            );
        }
        Ok(())
    }

    async fn send(
        &self,
        to: &Address,
        body: &str,
        attachment: Option<&Path>,
    ) -> anyhow::Result<()> {
        let payload = SendRequest {
            to: to.as_str(),
            body,
            media_path: attachment.and_then(|p| p.to_str()),
        };
        let response = self
            .authorize(self.http.post(self.build_url("/messages")))
            .json(&payload)
            .send()
            .await?;
        let ack: BridgeAck = response.json().await?;
        if !ack.ok {
            anyhow::bail!(
                "bridge rejected message: {}",
                ack.description
                    .unwrap_or_else(|| "unknown error".to_string())
            );
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    to: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    media_path: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BridgeAck {
    pub ok: bool,
    pub description: Option<String>,
}
