//! Status webhook and answered-state polling

use super::state::AppState;
use crate::domain::call::StatusTransition;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Correlation parameters carried in the callback URL
#[derive(Debug, Deserialize)]
pub struct StatusCallbackQuery {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub sig: Option<String>,
}

/// Fields of the provider's status callback body that matter here
#[derive(Debug, Deserialize)]
pub struct StatusCallbackForm {
    #[serde(rename = "CallStatus", default)]
    pub call_status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallCheckQuery {
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallCheckResponse {
    pub answered: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub answered_calls: usize,
    pub push_subscribers: usize,
}

/// Provider status callback
pub async fn call_status(
    State(state): State<AppState>,
    query: Option<Query<StatusCallbackQuery>>,
    form: Option<Form<StatusCallbackForm>>,
) -> StatusCode {
    let (user_id, sig) = match query {
        Some(Query(q)) => (q.user_id, q.sig),
        None => (None, None),
    };
    let status = form.and_then(|Form(f)| f.call_status);

    info!("Webhook: status {:?} for user {:?}", status, user_id);

    let (Some(user_id), Some(status)) = (
        user_id.filter(|u| !u.trim().is_empty()),
        status.filter(|s| !s.is_empty()),
    ) else {
        warn!("Webhook: rejected, CallStatus or userId missing");
        return StatusCode::BAD_REQUEST;
    };

    if !state.dispatcher.callback().verify(&user_id, sig.as_deref()) {
        warn!("Webhook: rejected, bad callback signature for {}", user_id);
        return StatusCode::FORBIDDEN;
    }

    match state.tracker.record_status(&user_id, &status).await {
        StatusTransition::Answered => info!("Webhook: {} answered", user_id),
        StatusTransition::AlreadyAnswered | StatusTransition::Ignored => {}
    }

    StatusCode::OK
}

/// Poll whether a phone number has been answered
pub async fn call_check(
    State(state): State<AppState>,
    Query(query): Query<CallCheckQuery>,
) -> Json<CallCheckResponse> {
    let answered = match query.phone.as_deref() {
        Some(phone) => state.tracker.is_answered(phone).await,
        None => false,
    };
    Json(CallCheckResponse { answered })
}

/// Health check
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        answered_calls: state.tracker.answered_count().await,
        push_subscribers: state.event_broadcaster.subscriber_count(),
    })
}
