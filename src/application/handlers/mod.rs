pub mod connection;
pub mod inbound;
