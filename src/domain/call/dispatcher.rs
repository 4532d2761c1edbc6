//! Call Dispatcher - places the "your turn" call

use super::callback::CallbackAddress;
use super::provider::{CallProvider, OutboundCall, PlacedCall, STATUS_CALLBACK_EVENTS};
use super::tracker::CallTracker;
use crate::domain::registrant::Registrant;
use crate::domain::shared::error::Result;
use metrics::counter;
use std::sync::Arc;
use tracing::{error, info};

/// Result of a dispatch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The registrant already answered; no call was placed
    AlreadyAnswered,
    /// The provider accepted the call
    Placed(PlacedCall),
}

/// Fixed call parameters taken from configuration
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Source number the call is placed from
    pub from_number: String,
    /// Call instructions fetched by the provider on connect
    pub voice_url: String,
}

/// Requests outbound calls for resolved registrants.
///
/// Never writes call state; only the tracker does.
pub struct CallDispatcher {
    provider: Arc<dyn CallProvider>,
    tracker: Arc<CallTracker>,
    callback: CallbackAddress,
    settings: DispatchSettings,
}

impl CallDispatcher {
    pub fn new(
        provider: Arc<dyn CallProvider>,
        tracker: Arc<CallTracker>,
        callback: CallbackAddress,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            provider,
            tracker,
            callback,
            settings,
        }
    }

    pub fn callback(&self) -> &CallbackAddress {
        &self.callback
    }

    /// Place a call to `registrant` unless their call was already answered
    pub async fn dispatch(&self, registrant: &Registrant) -> Result<DispatchOutcome> {
        let key = registrant.phone_key();

        if self.tracker.is_answered(key.as_str()).await {
            info!("Call for {} already answered, not calling again", key);
            return Ok(DispatchOutcome::AlreadyAnswered);
        }

        let call = OutboundCall {
            from: self.settings.from_number.clone(),
            to: registrant.phone.clone(),
            voice_url: self.settings.voice_url.clone(),
            status_callback: self.callback.url_for(key.as_str()),
            status_callback_events: STATUS_CALLBACK_EVENTS.iter().map(|e| e.to_string()).collect(),
        };

        info!("Placing call to {} ({})", registrant.name, registrant.phone);

        match self.provider.place_call(call).await {
            Ok(placed) => {
                info!("Call {} placed to {}", placed.sid, registrant.phone);
                counter!("yourturn_calls_placed_total").increment(1);
                Ok(DispatchOutcome::Placed(placed))
            }
            Err(e) => {
                error!("Failed to place call to {}: {}", registrant.phone, e);
                counter!("yourturn_calls_failed_total", "reason" => "provider").increment(1);
                Err(e)
            }
        }
    }
}
