//! Call submission API tests

mod common;

use axum::http::{header, StatusCode};
use common::{body_text, form_post, get, send, setup_app, RecordingProvider, BASE_URL, JANE_PHONE};
use serde_json::Value;

#[tokio::test]
async fn test_index_renders_form() {
    let app = setup_app(RecordingProvider::default(), None);

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(r#"<form method="post" action="/call">"#));
    assert!(html.contains(r#"name="username""#));
}

#[tokio::test]
async fn test_empty_username_never_calls() {
    let app = setup_app(RecordingProvider::default(), None);

    for body in ["username=", "username=+++", ""] {
        let response = send(&app, form_post("/call", body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Please enter a name!"));
    }

    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn test_unregistered_name_renders_error() {
    let app = setup_app(RecordingProvider::default(), None);

    let response = send(&app, form_post("/call", "username=Nobody+Here")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("You are not registered!"));
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn test_normalized_case_insensitive_lookup_places_call() {
    let app = setup_app(RecordingProvider::default(), None);

    // "  jane   DOE "
    let response = send(&app, form_post("/call", "username=++jane+++DOE+")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Calling Jane Doe"));
    assert!(html.contains(r#"const phone = "+15551234567";"#));

    let calls = app.provider.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].to, JANE_PHONE);
    assert_eq!(calls[0].from, "+15559990000");
    assert_eq!(
        calls[0].status_callback,
        format!("{}/call-status?userId=%2B15551234567", BASE_URL)
    );
}

#[tokio::test]
async fn test_provider_failure_returns_500() {
    let app = setup_app(RecordingProvider::failing("Authenticate"), None);

    let response = send(&app, form_post("/call", "username=Jane+Doe")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let text = body_text(response).await;
    assert!(text.contains("Something went wrong!"));
    assert!(text.contains("Authenticate"));

    // a failed placement writes no call state
    assert!(!app.state.tracker.is_answered(JANE_PHONE).await);
}

#[tokio::test]
async fn test_already_answered_redirects_without_calling() {
    let app = setup_app(RecordingProvider::default(), None);
    app.state.tracker.record_status(JANE_PHONE, "answered").await;

    let response = send(&app, form_post("/call", "username=Jane+Doe")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/thankyou");
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn test_thank_you_page() {
    let app = setup_app(RecordingProvider::default(), None);

    let response = send(&app, get("/thankyou")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Thank you!"));
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app(RecordingProvider::default(), None);
    app.state.tracker.record_status(JANE_PHONE, "in-progress").await;

    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["answered_calls"], 1);
    assert_eq!(json["push_subscribers"], 0);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup_app(RecordingProvider::default(), None);

    let response = send(&app, get("/metrics")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
