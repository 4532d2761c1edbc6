//! Shared handler state

use crate::domain::call::{CallDispatcher, CallTracker};
use crate::domain::registrant::RegistrantLookup;
use crate::domain::shared::EventBroadcaster;
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<RegistrantLookup>,
    pub dispatcher: Arc<CallDispatcher>,
    pub tracker: Arc<CallTracker>,
    pub event_broadcaster: Arc<EventBroadcaster>,
}
