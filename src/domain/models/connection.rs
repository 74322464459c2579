use serde::{Deserialize, Serialize};

/// Identity metadata for the paired session, available only while ready.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientInfo {
    pub phone: String,
    pub name: String,
    pub platform: String,
}

/// Session lifecycle. Transitions are driven only by events from the
/// network; nothing times out internally.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Uninitialized,
    AwaitingPairing,
    Ready,
    Disconnected,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Uninitialized => "uninitialized",
            ConnectionState::AwaitingPairing => "awaiting_pairing",
            ConnectionState::Ready => "ready",
            ConnectionState::Disconnected => "disconnected",
        }
    }
}

/// Asynchronous events surfaced by the network client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// Pairing challenge an operator must complete out-of-band.
    PairingCode(String),
    Ready(ClientInfo),
    AuthFailure(String),
    Disconnected { reason: Option<String> },
}
