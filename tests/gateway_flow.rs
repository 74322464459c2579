//! End-to-end gateway scenarios over the mock network client.

use std::time::Duration;

use farmlink_gateway::application::handlers::connection::{
    ConnectionWorker, ConnectionWorkerConfig,
};
use farmlink_gateway::application::handlers::inbound::InboundHandler;
use farmlink_gateway::application::services::gateway::NotificationGateway;
use farmlink_gateway::application::services::router::AutoReplyRouter;
use farmlink_gateway::domain::models::{
    DeliveryOutcome, InboundMessage, LifecycleEvent, LineItem, OrderConfirmationPayload,
    OrderStatus, OrderStatusUpdatePayload,
};
use farmlink_gateway::infrastructure::messaging::MockChatClient;

fn worker_config(pacing_ms: u64) -> ConnectionWorkerConfig {
    ConnectionWorkerConfig {
        drain_pacing: Duration::from_millis(pacing_ms),
        send_timeout: Duration::from_secs(5),
    }
}

fn confirmation(order_id: &str) -> OrderConfirmationPayload {
    OrderConfirmationPayload {
        order_id: order_id.to_string(),
        customer_name: "Amina".to_string(),
        items: vec![LineItem {
            name: "Tomato".to_string(),
            quantity: 2,
            price: 5.0,
        }],
        total: 10.0,
        delivery_address: "12 Riverside Dr, Nairobi".to_string(),
        estimated_delivery: "Tomorrow, 10am-1pm".to_string(),
    }
}

#[tokio::test]
async fn ready_session_delivers_immediately() {
    let client = MockChatClient::new();
    let (handle, _task) = ConnectionWorker::spawn(client.clone(), worker_config(10));
    let gateway = NotificationGateway::new(handle.clone(), "254");

    handle
        .lifecycle(LifecycleEvent::Ready(MockChatClient::client_info()))
        .await;

    let outcome = gateway
        .send_order_confirmation("0712345678", confirmation("X1"))
        .await;
    assert_eq!(outcome, DeliveryOutcome::Sent);

    let sent = client.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "254712345678");
    assert!(sent[0].body.contains("X1"));
    assert!(sent[0].body.contains("Tomato"));
    assert!(sent[0].body.contains("10.00"));
}

#[tokio::test(start_paused = true)]
async fn pairing_session_queues_then_drains_in_order() {
    let client = MockChatClient::new();
    let (handle, _task) = ConnectionWorker::spawn(client.clone(), worker_config(1_000));
    let gateway = NotificationGateway::new(handle.clone(), "254");

    // Pairing is still pending; everything queues.
    handle
        .lifecycle(LifecycleEvent::PairingCode("ABCD-1234".to_string()))
        .await;

    let first = gateway
        .send_order_confirmation("0712345678", confirmation("X1"))
        .await;
    let second = gateway
        .send_order_status_update(
            "0712345678",
            OrderStatusUpdatePayload {
                order_id: "X1".to_string(),
                customer_name: "Amina".to_string(),
                status: OrderStatus::Preparing,
                status_message: "Your produce is being picked.".to_string(),
                tracking_number: None,
            },
        )
        .await;

    assert_eq!(first, DeliveryOutcome::Queued);
    assert_eq!(second, DeliveryOutcome::Queued);
    assert_eq!(gateway.pending_count().await, 2);
    assert_eq!(client.sent_count(), 0);

    // Operator completes pairing; the queue drains FIFO with pacing.
    handle
        .lifecycle(LifecycleEvent::Ready(MockChatClient::client_info()))
        .await;
    while gateway.pending_count().await > 0 {
        tokio::task::yield_now().await;
    }
    tokio::task::yield_now().await;

    let sent = client.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].body.contains("Order Confirmed"));
    assert!(sent[1].body.contains("Order Update"));
    assert!(sent[1].at - sent[0].at >= Duration::from_millis(1_000));
}

#[tokio::test]
async fn inbound_greeting_gets_one_canned_reply() {
    let client = MockChatClient::new();
    let handler = InboundHandler::new(AutoReplyRouter::default(), client.clone());

    handler
        .handle(InboundMessage {
            sender: "254712345678".to_string(),
            body: "Hi there".to_string(),
            contact_name: Some("Amina".to_string()),
        })
        .await;

    let sent = client.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "254712345678");
    assert!(sent[0].body.contains("Hello"));

    // An unmatched body produces no outbound send at all.
    handler
        .handle(InboundMessage {
            sender: "254712345678".to_string(),
            body: "xyz unrelated".to_string(),
            contact_name: None,
        })
        .await;
    assert_eq!(client.sent_count(), 1);
}
