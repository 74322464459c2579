mod connection;
mod inbound;
mod notification;

pub use connection::{ClientInfo, ConnectionState, LifecycleEvent};
pub use inbound::InboundMessage;
pub use notification::{
    DeliveryConfirmationPayload, DeliveryDispatchPayload, DeliveryOutcome, LineItem,
    NotificationKind, NotificationPayload, NotificationRequest, OrderConfirmationPayload,
    OrderStatus, OrderStatusUpdatePayload, PaymentReminderPayload, RenderedMessage,
};
