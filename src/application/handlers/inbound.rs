//! Inbound auto-reply dispatch.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::services::network::ChatNetworkClient;
use crate::application::services::router::AutoReplyRouter;
use crate::domain::models::InboundMessage;
use crate::domain::phone::{self, Address};

/// Answers inbound messages with at most one canned reply, sent straight
/// through the network client, independent of the outbound queue. Inbound
/// messages are never surfaced to the rest of the application.
pub struct InboundHandler {
    router: AutoReplyRouter,
    client: Arc<dyn ChatNetworkClient>,
}

impl InboundHandler {
    pub fn new(router: AutoReplyRouter, client: Arc<dyn ChatNetworkClient>) -> Self {
        Self { router, client }
    }

    pub async fn handle(&self, inbound: InboundMessage) {
        let masked = phone::mask(&inbound.sender);
        info!(
            from = %masked,
            contact = inbound.contact_name.as_deref().unwrap_or("unknown"),
            "inbound message received"
        );
        let Some(reply) = self.router.route(&inbound) else {
            return;
        };
        let to = Address::from_canonical(inbound.sender);
        if let Err(err) = self.client.send(&to, &reply, None).await {
            warn!(to = %masked, error = %err, "auto-reply failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::messaging::mock::MockChatClient;

    fn inbound(body: &str) -> InboundMessage {
        InboundMessage {
            sender: "254712345678".to_string(),
            body: body.to_string(),
            contact_name: Some("Amina".to_string()),
        }
    }

    #[tokio::test]
    async fn greeting_gets_exactly_one_reply() {
        let client = MockChatClient::new();
        let handler = InboundHandler::new(AutoReplyRouter::default(), client.clone());

        handler.handle(inbound("Hi there")).await;

        let sent = client.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "254712345678");
        assert!(sent[0].body.contains("Hello"));
    }

    #[tokio::test]
    async fn unmatched_message_sends_nothing() {
        let client = MockChatClient::new();
        let handler = InboundHandler::new(AutoReplyRouter::default(), client.clone());

        handler.handle(inbound("xyz unrelated")).await;

        assert_eq!(client.sent_count(), 0);
    }

    #[tokio::test]
    async fn send_failure_is_swallowed() {
        let client = MockChatClient::new();
        client.set_fail_sends(true);
        let handler = InboundHandler::new(AutoReplyRouter::default(), client.clone());

        // Must not panic or propagate; the reply is simply lost.
        handler.handle(inbound("hello")).await;

        assert_eq!(client.sent_count(), 0);
    }
}
