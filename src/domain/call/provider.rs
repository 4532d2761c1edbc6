//! Phone-call provider port

use crate::domain::shared::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Progress events the provider reports back to the status callback
pub const STATUS_CALLBACK_EVENTS: [&str; 3] = ["ringing", "answered", "completed"];

/// Request to place an outbound call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundCall {
    /// Configured source number
    pub from: String,
    /// Registrant's phone
    pub to: String,
    /// Where the provider fetches call instructions once connected
    pub voice_url: String,
    /// Webhook the provider invokes with call progress
    pub status_callback: String,
    pub status_callback_events: Vec<String>,
}

/// Provider acknowledgement of a placed call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlacedCall {
    pub sid: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Places outbound calls through an external telephony provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallProvider: Send + Sync {
    /// Request an outbound call. Failures are not retried.
    async fn place_call(&self, call: OutboundCall) -> Result<PlacedCall>;
}
