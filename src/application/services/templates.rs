//! Message templates for every notification kind.
//!
//! Rendering is pure and total: missing optional fields drop their section
//! from the body, and nothing here can fail.

use std::fmt::Write;

use crate::domain::models::{
    DeliveryConfirmationPayload, DeliveryDispatchPayload, NotificationPayload,
    OrderConfirmationPayload, OrderStatusUpdatePayload, PaymentReminderPayload,
};

pub fn render(payload: &NotificationPayload) -> String {
    match payload {
        NotificationPayload::OrderConfirmation(p) => order_confirmation(p),
        NotificationPayload::OrderStatusUpdate(p) => order_status_update(p),
        NotificationPayload::DeliveryDispatch(p) => delivery_dispatch(p),
        NotificationPayload::DeliveryConfirmation(p) => delivery_confirmation(p),
        NotificationPayload::PaymentReminder(p) => payment_reminder(p),
    }
}

fn order_confirmation(p: &OrderConfirmationPayload) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "🌱 *FarmLink Order Confirmed!*");
    let _ = writeln!(body);
    let _ = writeln!(body, "Hello {}, thank you for your order!", p.customer_name);
    let _ = writeln!(body);
    let _ = writeln!(body, "📦 Order #{}", p.order_id);
    let _ = writeln!(body);
    let _ = writeln!(body, "🛒 Items:");
    for item in &p.items {
        let _ = writeln!(
            body,
            "  - {} x{} @ KSh {:.2}",
            item.name, item.quantity, item.price
        );
    }
    let _ = writeln!(body, "💰 Total: KSh {:.2}", p.total);
    let _ = writeln!(body);
    let _ = writeln!(body, "📍 Delivery address: {}", p.delivery_address);
    let _ = writeln!(body, "🚚 Estimated delivery: {}", p.estimated_delivery);
    let _ = writeln!(body);
    let _ = write!(body, "Reply \"track\" any time for an update.");
    body
}

fn order_status_update(p: &OrderStatusUpdatePayload) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "{} *FarmLink Order Update*", p.status.marker());
    let _ = writeln!(body);
    let _ = writeln!(body, "Hello {},", p.customer_name);
    let _ = writeln!(body);
    let _ = writeln!(body, "Order #{} is now: *{}*", p.order_id, p.status.label());
    let _ = writeln!(body, "{}", p.status_message);
    if let Some(tracking) = &p.tracking_number {
        let _ = writeln!(body);
        let _ = writeln!(body, "🔎 Tracking number: {tracking}");
    }
    let _ = writeln!(body);
    let _ = write!(body, "Thank you for shopping with FarmLink!");
    body
}

fn delivery_dispatch(p: &DeliveryDispatchPayload) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "🚚 *Your delivery is on the way!*");
    let _ = writeln!(body);
    let _ = writeln!(
        body,
        "Hello {}, order #{} has been dispatched.",
        p.customer_name, p.order_id
    );
    let _ = writeln!(body);
    let _ = writeln!(body, "👤 Driver: {}", p.driver_name);
    let _ = writeln!(body, "📞 Contact: {}", p.driver_phone);
    let _ = writeln!(body, "⏰ Estimated arrival: {}", p.estimated_arrival);
    if let Some(instructions) = &p.delivery_instructions {
        let _ = writeln!(body, "📝 Delivery instructions: {instructions}");
    }
    let _ = writeln!(body);
    let _ = write!(body, "Please keep your phone nearby.");
    body
}

fn delivery_confirmation(p: &DeliveryConfirmationPayload) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "🎉 *Order Delivered!*");
    let _ = writeln!(body);
    let _ = writeln!(
        body,
        "Hello {}, order #{} was delivered at {}.",
        p.customer_name, p.order_id, p.delivered_at
    );
    let _ = writeln!(body);
    let _ = writeln!(body, "Thank you for choosing fresh, local produce!");
    if p.request_rating {
        let _ = writeln!(body);
        let _ = writeln!(body, "⭐ How did we do? Reply with a rating from 1 to 5.");
    }
    body.truncate(body.trim_end().len());
    body
}

fn payment_reminder(p: &PaymentReminderPayload) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "💳 *Payment Reminder*");
    let _ = writeln!(body);
    let _ = writeln!(body, "Hello {},", p.customer_name);
    let _ = writeln!(body);
    let _ = writeln!(
        body,
        "Order #{} has a pending payment of KSh {:.2}.",
        p.order_id, p.amount
    );
    let _ = writeln!(body, "📅 Due: {}", p.due_date);
    if let Some(link) = &p.payment_link {
        let _ = writeln!(body, "🔗 Pay here: {link}");
    }
    let _ = writeln!(body);
    let _ = write!(body, "Please complete payment to keep your delivery on schedule.");
    body
}
