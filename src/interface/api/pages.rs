//! HTML views

use crate::domain::registrant::Registrant;
use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Error shown when the form is submitted without a name
pub const MISSING_NAME: &str = "Please enter a name!";
/// Error shown when the name is not registered
pub const NOT_REGISTERED: &str = "You are not registered!";

/// Submission form, with an optional inline error
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexView<'a> {
    pub error: Option<&'a str>,
}

/// Waiting view bound to the called registrant
#[derive(Template)]
#[template(path = "call_processing.html")]
pub struct CallProcessingView {
    pub name: String,
    pub phone: String,
    /// Identifier the page script polls and matches push events against
    pub phone_key: String,
}

impl From<&Registrant> for CallProcessingView {
    fn from(registrant: &Registrant) -> Self {
        Self {
            name: registrant.name.clone(),
            phone: registrant.phone.clone(),
            phone_key: registrant.phone_key().as_str().to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "thank_you.html")]
pub struct ThankYouView;

/// Render a view, answering 500 if the template fails
pub fn render_template<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering error").into_response()
        }
    }
}

pub async fn index_page() -> Response {
    render_template(IndexView { error: None })
}

pub async fn thank_you_page() -> Response {
    render_template(ThankYouView)
}
