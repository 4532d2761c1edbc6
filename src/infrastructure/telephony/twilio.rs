//! Twilio Programmable Voice client
//!
//! Places outbound calls through the Calls resource of the Twilio REST API.
//! Call progress comes back separately through the status callback webhook.

use crate::domain::call::{CallProvider, OutboundCall, PlacedCall};
use crate::domain::shared::error::{DomainError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Client for the Twilio Calls API
#[derive(Clone)]
pub struct TwilioClient {
    client: Client,
    api_base: String,
    account_sid: String,
    auth_token: String,
}

/// Error body returned by Twilio on non-2xx responses
#[derive(Debug, Deserialize)]
struct TwilioError {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

impl TwilioClient {
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let account_sid = account_sid.into();
        let auth_token = auth_token.into();
        if account_sid.is_empty() || auth_token.is_empty() {
            return Err(DomainError::Configuration(
                "Twilio account SID and auth token are required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Configuration(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            account_sid,
            auth_token,
        })
    }

    fn calls_endpoint(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.api_base, self.account_sid
        )
    }
}

#[async_trait]
impl CallProvider for TwilioClient {
    async fn place_call(&self, call: OutboundCall) -> Result<PlacedCall> {
        let mut form: Vec<(&str, &str)> = vec![
            ("From", call.from.as_str()),
            ("To", call.to.as_str()),
            ("Url", call.voice_url.as_str()),
            ("StatusCallback", call.status_callback.as_str()),
        ];
        for event in &call.status_callback_events {
            form.push(("StatusCallbackEvent", event.as_str()));
        }

        debug!("POST {} to={}", self.calls_endpoint(), call.to);

        let response = self
            .client
            .post(self.calls_endpoint())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TwilioError>(&body) {
                Ok(TwilioError {
                    code: Some(code),
                    message,
                }) => format!("{} (Twilio error {})", message, code),
                Ok(TwilioError { message, .. }) => message,
                Err(_) => format!("HTTP {}: {}", status, body),
            };
            error!("Twilio rejected call to {}: {}", call.to, message);
            return Err(DomainError::Provider(message));
        }

        Ok(response.json::<PlacedCall>().await?)
    }
}
