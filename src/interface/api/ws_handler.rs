//! WebSocket push channel

use super::metrics_handler::update_push_subscribers;
use crate::domain::shared::EventBroadcaster;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// WebSocket handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(broadcaster): State<Arc<EventBroadcaster>>,
) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, broadcaster))
}

/// Forward push events to one subscriber until either side goes away
async fn handle_socket(socket: WebSocket, broadcaster: Arc<EventBroadcaster>) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = broadcaster.subscribe();
    let subscriber_id = Uuid::new_v4();

    info!("Push subscriber {} connected", subscriber_id);
    update_push_subscribers(broadcaster.subscriber_count());

    let mut send_task = tokio::spawn(async move {
        loop {
            let event = match rx.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Push subscriber {} lagged, skipped {} events", subscriber_id, skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json)).await.is_err() {
                        debug!("Failed to send event to push subscriber {}", subscriber_id);
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to serialize push event: {}", e);
                }
            }
        }
    });

    // Client frames carry nothing we act on
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Close(_) => {
                    debug!("Push subscriber {} sent close", subscriber_id);
                    break;
                }
                Message::Text(text) => {
                    debug!("Ignoring text frame from {}: {}", subscriber_id, text);
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
            let _ = recv_task.await;
        }
        _ = (&mut recv_task) => {
            send_task.abort();
            // wait so the receiver is dropped before counting
            let _ = send_task.await;
        }
    }

    info!("Push subscriber {} disconnected", subscriber_id);
    update_push_subscribers(broadcaster.subscriber_count());
}
