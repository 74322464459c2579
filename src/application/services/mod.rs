pub mod gateway;
pub mod network;
pub mod router;
pub mod templates;
