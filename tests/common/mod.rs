//! Shared fixtures for router-level tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // For `oneshot`
use yourturn::app::build_state;
use yourturn::config::Config;
use yourturn::domain::call::{CallProvider, OutboundCall, PlacedCall};
use yourturn::domain::registrant::Registrant;
use yourturn::infrastructure::persistence::InMemoryRegistrantRepository;
use yourturn::interface::api::{build_router, detached_metrics, AppState};
use yourturn::{DomainError, Result};

pub const JANE_PHONE: &str = "+15551234567";
pub const BASE_URL: &str = "https://turns.example.com";

/// Call provider that records requests instead of dialing
#[derive(Default)]
pub struct RecordingProvider {
    pub calls: Mutex<Vec<OutboundCall>>,
    pub fail_with: Option<String>,
}

impl RecordingProvider {
    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CallProvider for RecordingProvider {
    async fn place_call(&self, call: OutboundCall) -> Result<PlacedCall> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(message) => Err(DomainError::Provider(message.clone())),
            None => Ok(PlacedCall {
                sid: "CA0123".to_string(),
                status: Some("queued".to_string()),
            }),
        }
    }
}

pub fn test_config(secret: Option<&str>) -> Config {
    let mut config = Config::default();
    config.twilio.account_sid = "AC123".to_string();
    config.twilio.auth_token = "token".to_string();
    config.twilio.from_number = "+15559990000".to_string();
    config.twilio.voice_url = "https://voice.example.com/twiml".to_string();
    config.callback.base_url = BASE_URL.to_string();
    config.callback.secret = secret.map(str::to_string);
    config
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub provider: Arc<RecordingProvider>,
}

pub fn setup_app(provider: RecordingProvider, secret: Option<&str>) -> TestApp {
    let repository = InMemoryRegistrantRepository::new(vec![
        Registrant::new("Jane Doe", JANE_PHONE),
        Registrant::new("John Roe", "+15557654321"),
    ]);
    let provider = Arc::new(provider);

    let state = build_state(&test_config(secret), Arc::new(repository), provider.clone())
        .expect("Failed to build state");
    let router = build_router(state.clone(), detached_metrics());

    TestApp {
        router,
        state,
        provider,
    }
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
