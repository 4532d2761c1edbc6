//! Status Tracker - answered flag per phone identifier
//!
//! ```text
//! [not-answered] --(in-progress | answered)--> [answered]
//! [answered]     --(any status)-------------> [answered]
//! ```

use crate::domain::shared::{EventBroadcaster, PhoneNumber};
use metrics::counter;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Provider statuses that mean the callee picked up
pub const ANSWERED_STATUSES: [&str; 2] = ["in-progress", "answered"];

/// Statuses the provider is known to report; anything else is labelled `other`
pub const KNOWN_STATUSES: [&str; 9] = [
    "queued",
    "ringing",
    "in-progress",
    "answered",
    "completed",
    "busy",
    "no-answer",
    "failed",
    "canceled",
];

/// Outcome of applying a status event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTransition {
    /// The identifier moved to answered and subscribers were notified
    Answered,
    /// The identifier was already answered; nothing changed
    AlreadyAnswered,
    /// The status does not indicate an answer
    Ignored,
}

/// Owns the in-memory call state.
///
/// Entries are created lazily on the first answered event and never removed.
/// State does not survive a restart.
pub struct CallTracker {
    /// Presence of a key means answered
    answered: Arc<RwLock<HashSet<PhoneNumber>>>,
    broadcaster: Arc<EventBroadcaster>,
}

impl CallTracker {
    pub fn new(broadcaster: Arc<EventBroadcaster>) -> Self {
        Self {
            answered: Arc::new(RwLock::new(HashSet::new())),
            broadcaster,
        }
    }

    /// Whether `status` counts as answered
    pub fn is_answered_status(status: &str) -> bool {
        ANSWERED_STATUSES.contains(&status)
    }

    /// Metric label for `status`, bounded to the known provider statuses
    pub fn status_label(status: &str) -> &'static str {
        KNOWN_STATUSES
            .iter()
            .find(|known| **known == status)
            .copied()
            .unwrap_or("other")
    }

    /// Apply a provider status event for `user_id`
    pub async fn record_status(&self, user_id: &str, status: &str) -> StatusTransition {
        counter!("yourturn_status_events_total", "status" => Self::status_label(status)).increment(1);

        if !Self::is_answered_status(status) {
            debug!("Status {} for {} does not change call state", status, user_id);
            return StatusTransition::Ignored;
        }

        let key = PhoneNumber::new(user_id);
        {
            // Check and insert under one write lock so the transition fires once
            let mut answered = self.answered.write().await;
            if !answered.insert(key.clone()) {
                debug!("Call for {} already answered", key);
                return StatusTransition::AlreadyAnswered;
            }
        }

        info!("Call answered for {}, notifying subscribers", key);
        counter!("yourturn_calls_answered_total").increment(1);
        self.broadcaster.call_answered(key.as_str());

        StatusTransition::Answered
    }

    /// Poll whether `phone` has been answered; whitespace in `phone` is ignored
    pub async fn is_answered(&self, phone: &str) -> bool {
        let key = PhoneNumber::new(phone);
        self.answered.read().await.contains(&key)
    }

    /// Number of identifiers marked answered
    pub async fn answered_count(&self) -> usize {
        self.answered.read().await.len()
    }
}
