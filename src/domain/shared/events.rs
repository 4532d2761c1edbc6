//! Push events fanned out to connected browsers

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Events delivered to push subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum PushEvent {
    /// A tracked call was answered
    #[serde(rename = "callAnswered")]
    CallAnswered {
        #[serde(rename = "userId")]
        user_id: String,
    },
}

/// Event broadcaster
#[derive(Clone)]
pub struct EventBroadcaster {
    tx: broadcast::Sender<PushEvent>,
}

impl EventBroadcaster {
    /// Create new event broadcaster with specified capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to every current subscriber
    pub fn publish(&self, event: PushEvent) {
        // No receivers is not an error: nobody is watching yet
        if let Err(e) = self.tx.send(event) {
            debug!("Push event dropped, no subscribers: {:?}", e.0);
        }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<PushEvent> {
        self.tx.subscribe()
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Broadcast call answered event
    pub fn call_answered(&self, user_id: impl Into<String>) {
        self.publish(PushEvent::CallAnswered {
            user_id: user_id.into(),
        });
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe() {
        let broadcaster = EventBroadcaster::new(16);
        assert_eq!(broadcaster.subscriber_count(), 0);
        let _rx = broadcaster.subscribe();
        assert_eq!(broadcaster.subscriber_count(), 1);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let broadcaster = EventBroadcaster::default();
        broadcaster.call_answered("+15551234567");
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let broadcaster = EventBroadcaster::new(16);
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        broadcaster.call_answered("+15551234567");

        let expected = PushEvent::CallAnswered {
            user_id: "+15551234567".to_string(),
        };
        assert_eq!(rx1.recv().await.unwrap(), expected);
        assert_eq!(rx2.recv().await.unwrap(), expected);
    }

    #[test]
    fn test_event_serialization() {
        let event = PushEvent::CallAnswered {
            user_id: "+15551234567".to_string(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "callAnswered");
        assert_eq!(json["data"]["userId"], "+15551234567");
    }
}
