//! Configuration management
//!
//! Layers, lowest precedence first:
//! 1. built-in defaults
//! 2. `config/yourturn.{toml,json,yaml}` if present
//! 3. `YOURTURN__SECTION__KEY` environment variables
//! 4. the conventional deployment variables (`PORT`, `BASE_URL`,
//!    `TWILIO_ACCOUNT_SID`, ...)

use crate::domain::shared::error::{DomainError, Result};
use crate::infrastructure::telephony::twilio::TWILIO_API_BASE;
use config::{Config as Loader, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default config file, extension resolved by the loader
pub const DEFAULT_CONFIG_FILE: &str = "config/yourturn";

/// Conventional variable → config key
const DEPLOYMENT_VARIABLES: [(&str, &str); 8] = [
    ("PORT", "server.port"),
    ("BASE_URL", "callback.base_url"),
    ("CALLBACK_SECRET", "callback.secret"),
    ("TWILIO_ACCOUNT_SID", "twilio.account_sid"),
    ("TWILIO_AUTH_TOKEN", "twilio.auth_token"),
    ("TWILIO_PHONE_NUMBER", "twilio.from_number"),
    ("TWILIO_VOICE_URL", "twilio.voice_url"),
    ("DATABASE_URL", "store.database_url"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub twilio: TwilioConfig,
    pub callback: CallbackConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct TwilioConfig {
    #[serde(default)]
    pub account_sid: String,
    #[serde(default)]
    pub auth_token: String,
    /// Source number calls are placed from
    #[serde(default)]
    pub from_number: String,
    /// Call instructions URL handed to Twilio
    #[serde(default)]
    pub voice_url: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

// Keep the auth token out of logs
impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"****")
            .field("from_number", &self.from_number)
            .field("voice_url", &self.voice_url)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct CallbackConfig {
    /// Public URL the provider reaches this service on
    pub base_url: String,
    /// Enables signed status callbacks
    #[serde(default)]
    pub secret: Option<String>,
}

impl std::fmt::Debug for CallbackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackConfig")
            .field("base_url", &self.base_url)
            .field("signed", &self.secret.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// PostgreSQL connection string; the in-memory store is used when unset
    #[serde(default)]
    pub database_url: Option<String>,
    /// JSON registrants for the in-memory store
    #[serde(default)]
    pub seed_file: Option<String>,
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            twilio: TwilioConfig {
                account_sid: String::new(),
                auth_token: String::new(),
                from_number: String::new(),
                voice_url: String::new(),
                api_base: TWILIO_API_BASE.to_string(),
                timeout_secs: 15,
            },
            callback: CallbackConfig {
                base_url: "http://localhost:3000".to_string(),
                secret: None,
            },
            store: StoreConfig {
                database_url: None,
                seed_file: None,
                max_connections: 5,
            },
        }
    }
}

impl Config {
    /// Load from the default file and the process environment
    pub fn load() -> Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::from_sources(Some(DEFAULT_CONFIG_FILE), env)
    }

    /// Load from an optional config file and an explicit environment map
    pub fn from_sources(file: Option<&str>, env: HashMap<String, String>) -> Result<Self> {
        let mut builder = Loader::builder().add_source(Loader::try_from(&Config::default())?);

        if let Some(file) = file {
            builder = builder.add_source(File::with_name(file).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("YOURTURN")
                .prefix_separator("__")
                .separator("__")
                .source(Some(env.clone())),
        );

        for (var, key) in DEPLOYMENT_VARIABLES {
            let value = env.get(var).filter(|v| !v.is_empty()).cloned();
            builder = builder.set_override_option(key, value)?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot place calls
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("TWILIO_ACCOUNT_SID", &self.twilio.account_sid),
            ("TWILIO_AUTH_TOKEN", &self.twilio.auth_token),
            ("TWILIO_PHONE_NUMBER", &self.twilio.from_number),
            ("TWILIO_VOICE_URL", &self.twilio.voice_url),
            ("BASE_URL", &self.callback.base_url),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(DomainError::Configuration(format!(
                "missing required settings: {}",
                missing.join(", ")
            )));
        }
        if matches!(&self.callback.secret, Some(secret) if secret.is_empty()) {
            return Err(DomainError::Configuration(
                "callback secret must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
