use std::env::var;
use std::time::Duration;

use dotenvy::dotenv;

use crate::domain::errors::GatewayError;

/// Which network client implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Bridge,
    Mock,
}

pub struct Config {
    pub provider: Provider,
    /// Base URL of the local sidecar bridge to the chat network.
    pub bridge_url: String,
    /// Optional bearer token for the bridge.
    pub bridge_token: Option<String>,
    /// Default country code prepended by the phone normalizer.
    pub country_code: String,
    /// Fixed delay between consecutive sends while draining the queue.
    pub drain_pacing: Duration,
    /// Upper bound on a single network send.
    pub send_timeout: Duration,
    /// Long-poll wait used by the bridge event worker.
    pub event_poll_timeout: Duration,
}

impl Config {
    pub fn try_parse() -> Result<Config, GatewayError> {
        let _ = dotenv();

        let provider = match var("GATEWAY_PROVIDER").as_deref() {
            Ok("mock") => Provider::Mock,
            Ok("bridge") | Err(_) => Provider::Bridge,
            Ok(other) => {
                return Err(GatewayError::Config(format!(
                    "unknown GATEWAY_PROVIDER '{other}' (expected 'bridge' or 'mock')"
                )));
            }
        };

        let bridge_url = var("BRIDGE_URL").unwrap_or_else(|_| "http://localhost:3310".to_string());
        if provider == Provider::Bridge && bridge_url.is_empty() {
            return Err(GatewayError::Config("BRIDGE_URL must not be empty".into()));
        }

        Ok(Config {
            provider,
            bridge_url,
            bridge_token: var("BRIDGE_TOKEN").ok().filter(|t| !t.is_empty()),
            country_code: var("DEFAULT_COUNTRY_CODE").unwrap_or_else(|_| "254".to_string()),
            drain_pacing: Duration::from_millis(
                var("DRAIN_PACING_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1_000),
            ),
            send_timeout: Duration::from_secs(
                var("SEND_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
            event_poll_timeout: Duration::from_secs(
                var("EVENT_POLL_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(25),
            ),
        })
    }
}
