//! Wiring of configuration into the running service

use crate::config::{Config, StoreConfig, TwilioConfig};
use crate::domain::call::{
    CallDispatcher, CallProvider, CallTracker, CallbackAddress, CallbackSigner, DispatchSettings,
};
use crate::domain::registrant::{RegistrantLookup, RegistrantRepository};
use crate::domain::shared::error::Result;
use crate::domain::shared::EventBroadcaster;
use crate::infrastructure::persistence::InMemoryRegistrantRepository;
use crate::infrastructure::telephony::TwilioClient;
use crate::interface::api::AppState;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Push channel capacity per subscriber
pub const PUSH_CHANNEL_CAPACITY: usize = 256;

/// Assemble handler state from configuration and the two collaborators
pub fn build_state(
    config: &Config,
    repository: Arc<dyn RegistrantRepository>,
    provider: Arc<dyn CallProvider>,
) -> Result<AppState> {
    let signer = config
        .callback
        .secret
        .as_deref()
        .map(CallbackSigner::new)
        .transpose()?;
    if signer.is_some() {
        info!("Status callbacks are signed");
    } else {
        warn!("Status callbacks are not signed; set CALLBACK_SECRET to verify them");
    }
    let callback = CallbackAddress::new(&config.callback.base_url, signer)?;

    let event_broadcaster = Arc::new(EventBroadcaster::new(PUSH_CHANNEL_CAPACITY));
    let tracker = Arc::new(CallTracker::new(event_broadcaster.clone()));
    let dispatcher = Arc::new(CallDispatcher::new(
        provider,
        tracker.clone(),
        callback,
        DispatchSettings {
            from_number: config.twilio.from_number.clone(),
            voice_url: config.twilio.voice_url.clone(),
        },
    ));

    Ok(AppState {
        lookup: Arc::new(RegistrantLookup::new(repository)),
        dispatcher,
        tracker,
        event_broadcaster,
    })
}

/// Twilio-backed call provider
pub fn twilio_provider(config: &TwilioConfig) -> Result<Arc<dyn CallProvider>> {
    let client = TwilioClient::new(
        config.account_sid.clone(),
        config.auth_token.clone(),
        config.api_base.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;
    Ok(Arc::new(client))
}

/// Open the registrant store selected by configuration.
///
/// A database URL selects PostgreSQL; otherwise registrants come from the
/// seed file, or the store starts empty.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn RegistrantRepository>> {
    if let Some(url) = &config.database_url {
        return open_database(url, config.max_connections).await;
    }

    match &config.seed_file {
        Some(path) => Ok(Arc::new(
            InMemoryRegistrantRepository::from_json_file(path).await?,
        )),
        None => {
            warn!("No DATABASE_URL or seed file configured; registrant store is empty");
            Ok(Arc::new(InMemoryRegistrantRepository::default()))
        }
    }
}

#[cfg(feature = "postgres")]
async fn open_database(url: &str, max_connections: u32) -> Result<Arc<dyn RegistrantRepository>> {
    use crate::domain::shared::DomainError;
    use crate::infrastructure::persistence::{
        create_pool, run_migrations, PgRegistrantRepository, PoolSettings,
    };

    let settings = PoolSettings {
        max_connections,
        ..PoolSettings::new(url)
    };
    let pool = create_pool(&settings).await?;
    run_migrations(&pool)
        .await
        .map_err(|e| DomainError::Store(format!("migration failed: {}", e)))?;

    Ok(Arc::new(PgRegistrantRepository::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn open_database(_url: &str, _max_connections: u32) -> Result<Arc<dyn RegistrantRepository>> {
    Err(crate::domain::shared::DomainError::Configuration(
        "DATABASE_URL is set but this build has no postgres support".to_string(),
    ))
}
