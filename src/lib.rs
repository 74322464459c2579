//! Messaging gateway for the FarmLink marketplace.
//!
//! Bridges order notifications to the customer chat network through a local
//! sidecar bridge: renders templated messages, normalizes phone numbers,
//! queues outbound traffic while the session is pairing or disconnected, and
//! answers inbound free-text with canned replies.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::services::gateway::{NotificationGateway, start};
pub use domain::models::{
    DeliveryConfirmationPayload, DeliveryDispatchPayload, DeliveryOutcome, LineItem,
    NotificationKind, NotificationPayload, OrderConfirmationPayload, OrderStatus,
    OrderStatusUpdatePayload, PaymentReminderPayload,
};
