//! Call submission handler

use super::pages::{self, render_template, CallProcessingView, IndexView};
use super::state::AppState;
use crate::domain::call::DispatchOutcome;
use crate::domain::shared::DomainError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{error, info};

/// Submission form body
#[derive(Debug, Deserialize)]
pub struct CallForm {
    #[serde(default)]
    pub username: Option<String>,
}

/// Resolve the submitted name and call the registrant
pub async fn submit_call(State(state): State<AppState>, form: Option<Form<CallForm>>) -> Response {
    let username = form.and_then(|Form(form)| form.username);
    info!("API: Call requested for {:?}", username);

    let registrant = match state.lookup.resolve(username.as_deref()).await {
        Ok(registrant) => registrant,
        Err(DomainError::MissingInput(_)) => {
            return render_template(IndexView {
                error: Some(pages::MISSING_NAME),
            });
        }
        Err(DomainError::NotFound(_)) => {
            return render_template(IndexView {
                error: Some(pages::NOT_REGISTERED),
            });
        }
        Err(e) => {
            error!("API: Lookup failed: {}", e);
            return internal_error(&e);
        }
    };

    match state.dispatcher.dispatch(&registrant).await {
        Ok(DispatchOutcome::AlreadyAnswered) => Redirect::to("/thankyou").into_response(),
        Ok(DispatchOutcome::Placed(call)) => {
            info!("API: Call {} in progress for {}", call.sid, registrant.name);
            render_template(CallProcessingView::from(&registrant))
        }
        Err(e) => {
            error!("API: Call placement failed: {}", e);
            internal_error(&e)
        }
    }
}

fn internal_error(e: &DomainError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Something went wrong! {}", e),
    )
        .into_response()
}
