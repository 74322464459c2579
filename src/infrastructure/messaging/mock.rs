//! Mock network client for development and tests: records sends instead of
//! performing them.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::info;

use crate::application::services::network::ChatNetworkClient;
use crate::domain::models::ClientInfo;
use crate::domain::phone::Address;

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub to: String,
    pub body: String,
    pub attachment: Option<PathBuf>,
    pub at: Instant,
}

pub struct MockChatClient {
    sent: Mutex<Vec<SentMessage>>,
    fail_sends: AtomicBool,
}

impl MockChatClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_sends: AtomicBool::new(false),
        })
    }

    /// Make every subsequent send fail, to exercise the failure path.
    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().expect("mock send log poisoned").clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("mock send log poisoned").len()
    }

    /// Identity reported for mock sessions.
    pub fn client_info() -> ClientInfo {
        ClientInfo {
            phone: "254700000000".to_string(),
            name: "FarmLink (mock)".to_string(),
            platform: "mock".to_string(),
        }
    }
}

#[async_trait]
impl ChatNetworkClient for MockChatClient {
    async fn connect(&self) -> anyhow::Result<()> {
        info!("mock network: no pairing required");
        Ok(())
    }

    async fn send(
        &self,
        to: &Address,
        body: &str,
        attachment: Option<&Path>,
    ) -> anyhow::Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            anyhow::bail!("simulated send failure");
        }
        info!(to = %to, body_len = body.len(), "mock network: message recorded");
        self.sent
            .lock()
            .expect("mock send log poisoned")
            .push(SentMessage {
                to: to.as_str().to_string(),
                body: body.to_string(),
                attachment: attachment.map(Path::to_path_buf),
                at: Instant::now(),
            });
        Ok(())
    }
}
