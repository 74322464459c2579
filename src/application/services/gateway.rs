//! The notification gateway façade: the only surface the rest of the
//! marketplace is allowed to call.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::application::handlers::connection::{
    ConnectionHandle, ConnectionWorker, ConnectionWorkerConfig,
};
use crate::application::services::network::ChatNetworkClient;
use crate::application::services::templates;
use crate::config::Config;
use crate::domain::errors::GatewayError;
use crate::domain::models::{
    ClientInfo, DeliveryConfirmationPayload, DeliveryDispatchPayload, DeliveryOutcome,
    NotificationPayload, NotificationRequest, OrderConfirmationPayload, OrderStatusUpdatePayload,
    PaymentReminderPayload, RenderedMessage,
};
use crate::domain::phone;

// The chat network allows one session per identity, so one connection
// worker per process.
static GATEWAY_STARTED: AtomicBool = AtomicBool::new(false);

/// Start the process-wide gateway: spawns the connection worker and returns
/// the façade plus the handle the event worker feeds lifecycle events into.
pub fn start(
    client: Arc<dyn ChatNetworkClient>,
    config: &Config,
) -> Result<(NotificationGateway, ConnectionHandle), GatewayError> {
    if GATEWAY_STARTED.swap(true, Ordering::SeqCst) {
        return Err(GatewayError::AlreadyRunning);
    }
    let worker_config = ConnectionWorkerConfig {
        drain_pacing: config.drain_pacing,
        send_timeout: config.send_timeout,
    };
    let (handle, _task) = ConnectionWorker::spawn(client, worker_config);
    let gateway = NotificationGateway::new(handle.clone(), config.country_code.clone());
    Ok((gateway, handle))
}

#[derive(Clone)]
pub struct NotificationGateway {
    handle: ConnectionHandle,
    country_code: String,
}

impl NotificationGateway {
    pub fn new(handle: ConnectionHandle, country_code: impl Into<String>) -> Self {
        Self {
            handle,
            country_code: country_code.into(),
        }
    }

    /// Begin the out-of-band pairing handshake.
    pub async fn initialize(&self) {
        self.handle.initialize().await;
    }

    pub async fn send_order_confirmation(
        &self,
        phone: &str,
        payload: OrderConfirmationPayload,
    ) -> DeliveryOutcome {
        self.notify(phone, NotificationPayload::OrderConfirmation(payload), None)
            .await
    }

    pub async fn send_order_status_update(
        &self,
        phone: &str,
        payload: OrderStatusUpdatePayload,
    ) -> DeliveryOutcome {
        self.notify(phone, NotificationPayload::OrderStatusUpdate(payload), None)
            .await
    }

    pub async fn send_delivery_notification(
        &self,
        phone: &str,
        payload: DeliveryDispatchPayload,
    ) -> DeliveryOutcome {
        self.notify(phone, NotificationPayload::DeliveryDispatch(payload), None)
            .await
    }

    pub async fn send_delivery_confirmation(
        &self,
        phone: &str,
        payload: DeliveryConfirmationPayload,
    ) -> DeliveryOutcome {
        self.notify(
            phone,
            NotificationPayload::DeliveryConfirmation(payload),
            None,
        )
        .await
    }

    pub async fn send_payment_reminder(
        &self,
        phone: &str,
        payload: PaymentReminderPayload,
    ) -> DeliveryOutcome {
        self.notify(phone, NotificationPayload::PaymentReminder(payload), None)
            .await
    }

    /// Generic entry point for callers that attach local media.
    pub async fn send_with_attachment(
        &self,
        phone: &str,
        payload: NotificationPayload,
        attachment: PathBuf,
    ) -> DeliveryOutcome {
        self.notify(phone, payload, Some(attachment)).await
    }

    pub async fn is_ready(&self) -> bool {
        self.handle.is_ready().await
    }

    pub async fn client_info(&self) -> Option<ClientInfo> {
        self.handle.client_info().await
    }

    /// Messages currently waiting for the session to become ready.
    pub async fn pending_count(&self) -> usize {
        self.handle.pending_count().await
    }

    async fn notify(
        &self,
        phone_raw: &str,
        payload: NotificationPayload,
        attachment: Option<PathBuf>,
    ) -> DeliveryOutcome {
        let request = NotificationRequest::new(phone_raw, payload, attachment);
        let body = templates::render(&request.payload);
        let to = phone::normalize(&request.recipient, &self.country_code);
        let message = RenderedMessage {
            to,
            body,
            attachment: request.attachment.clone(),
        };
        let outcome = self.handle.dispatch(message).await;
        info!(
            request_id = %request.id,
            kind = request.payload.kind().as_str(),
            order_id = request.payload.order_id(),
            outcome = ?outcome,
            "notification processed"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::connection::{ConnectionWorker, ConnectionWorkerConfig};
    use crate::domain::models::{LifecycleEvent, LineItem};
    use crate::infrastructure::messaging::mock::MockChatClient;
    use std::time::Duration;

    fn gateway_with_mock() -> (NotificationGateway, ConnectionHandle, Arc<MockChatClient>) {
        let client = MockChatClient::new();
        let (handle, _task) = ConnectionWorker::spawn(
            client.clone(),
            ConnectionWorkerConfig {
                drain_pacing: Duration::from_millis(10),
                send_timeout: Duration::from_secs(5),
            },
        );
        let gateway = NotificationGateway::new(handle.clone(), "254");
        (gateway, handle, client)
    }

    fn confirmation() -> OrderConfirmationPayload {
        OrderConfirmationPayload {
            order_id: "X1".to_string(),
            customer_name: "Amina".to_string(),
            items: vec![LineItem {
                name: "Tomato".to_string(),
                quantity: 2,
                price: 5.0,
            }],
            total: 10.0,
            delivery_address: "12 Riverside Dr".to_string(),
            estimated_delivery: "Tomorrow".to_string(),
        }
    }

    #[tokio::test]
    async fn ready_session_sends_normalized_and_rendered() {
        let (gateway, handle, client) = gateway_with_mock();
        handle
            .lifecycle(LifecycleEvent::Ready(MockChatClient::client_info()))
            .await;

        let outcome = gateway
            .send_order_confirmation("0712345678", confirmation())
            .await;

        assert_eq!(outcome, DeliveryOutcome::Sent);
        let sent = client.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "254712345678");
        assert!(sent[0].body.contains("X1"));
        assert!(sent[0].body.contains("Tomato"));
        assert!(sent[0].body.contains("10.00"));
    }

    #[tokio::test]
    async fn not_ready_session_queues() {
        let (gateway, handle, client) = gateway_with_mock();

        let outcome = gateway
            .send_order_confirmation("0712345678", confirmation())
            .await;

        assert_eq!(outcome, DeliveryOutcome::Queued);
        assert_eq!(client.sent_count(), 0);
        assert_eq!(gateway.pending_count().await, 1);

        handle
            .lifecycle(LifecycleEvent::Ready(MockChatClient::client_info()))
            .await;
        while gateway.pending_count().await > 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(client.sent_count(), 1);
    }

    #[tokio::test]
    async fn client_info_mirrors_session_state() {
        let (gateway, handle, _client) = gateway_with_mock();
        assert!(gateway.client_info().await.is_none());
        assert!(!gateway.is_ready().await);

        handle
            .lifecycle(LifecycleEvent::Ready(MockChatClient::client_info()))
            .await;
        assert!(gateway.is_ready().await);
        assert_eq!(
            gateway.client_info().await.unwrap().phone,
            MockChatClient::client_info().phone
        );
    }
}
