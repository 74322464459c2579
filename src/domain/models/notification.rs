use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::phone::Address;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    OrderConfirmation,
    OrderStatusUpdate,
    DeliveryDispatch,
    DeliveryConfirmation,
    PaymentReminder,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::OrderConfirmation => "order_confirmation",
            NotificationKind::OrderStatusUpdate => "order_status_update",
            NotificationKind::DeliveryDispatch => "delivery_dispatch",
            NotificationKind::DeliveryConfirmation => "delivery_confirmation",
            NotificationKind::PaymentReminder => "payment_reminder",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Confirmed,
    Preparing,
    Packed,
    Shipped,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Being prepared",
            OrderStatus::Packed => "Packed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::OutForDelivery => "Out for delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "✅",
            OrderStatus::Preparing => "👨‍🍳",
            OrderStatus::Packed => "📦",
            OrderStatus::Shipped => "🚛",
            OrderStatus::OutForDelivery => "🚚",
            OrderStatus::Delivered => "🎉",
            OrderStatus::Cancelled => "❌",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfirmationPayload {
    pub order_id: String,
    pub customer_name: String,
    pub items: Vec<LineItem>,
    pub total: f64,
    pub delivery_address: String,
    pub estimated_delivery: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdatePayload {
    pub order_id: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub status_message: String,
    pub tracking_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryDispatchPayload {
    pub order_id: String,
    pub customer_name: String,
    pub driver_name: String,
    pub driver_phone: String,
    pub estimated_arrival: String,
    pub delivery_instructions: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfirmationPayload {
    pub order_id: String,
    pub customer_name: String,
    pub delivered_at: String,
    pub request_rating: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReminderPayload {
    pub order_id: String,
    pub customer_name: String,
    pub amount: f64,
    pub due_date: String,
    pub payment_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPayload {
    OrderConfirmation(OrderConfirmationPayload),
    OrderStatusUpdate(OrderStatusUpdatePayload),
    DeliveryDispatch(DeliveryDispatchPayload),
    DeliveryConfirmation(DeliveryConfirmationPayload),
    PaymentReminder(PaymentReminderPayload),
}

impl NotificationPayload {
    pub fn kind(&self) -> NotificationKind {
        match self {
            NotificationPayload::OrderConfirmation(_) => NotificationKind::OrderConfirmation,
            NotificationPayload::OrderStatusUpdate(_) => NotificationKind::OrderStatusUpdate,
            NotificationPayload::DeliveryDispatch(_) => NotificationKind::DeliveryDispatch,
            NotificationPayload::DeliveryConfirmation(_) => NotificationKind::DeliveryConfirmation,
            NotificationPayload::PaymentReminder(_) => NotificationKind::PaymentReminder,
        }
    }

    pub fn order_id(&self) -> &str {
        match self {
            NotificationPayload::OrderConfirmation(p) => &p.order_id,
            NotificationPayload::OrderStatusUpdate(p) => &p.order_id,
            NotificationPayload::DeliveryDispatch(p) => &p.order_id,
            NotificationPayload::DeliveryConfirmation(p) => &p.order_id,
            NotificationPayload::PaymentReminder(p) => &p.order_id,
        }
    }
}

/// One unit of outbound work, created by the façade on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub id: Uuid,
    pub recipient: String,
    pub payload: NotificationPayload,
    pub attachment: Option<PathBuf>,
    pub created_at: DateTime<Utc>,
}

impl NotificationRequest {
    pub fn new(
        recipient: impl Into<String>,
        payload: NotificationPayload,
        attachment: Option<PathBuf>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient: recipient.into(),
            payload,
            attachment,
            created_at: Utc::now(),
        }
    }
}

/// A rendered, addressed message ready for the network client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub to: Address,
    pub body: String,
    pub attachment: Option<PathBuf>,
}

/// What became of a façade send call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryOutcome {
    Queued,
    Sent,
    Failed,
}
