use serde::{Deserialize, Serialize};

/// An inbound free-text message from the network. Ephemeral: routed to at
/// most one canned reply and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub sender: String,
    pub body: String,
    pub contact_name: Option<String>,
}
