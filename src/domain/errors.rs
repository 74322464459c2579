use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Pairing failed: {0}")]
    Pairing(String),
    #[error("Send failed: {0}")]
    Send(String),
    #[error("Gateway is already running in this process")]
    AlreadyRunning,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
