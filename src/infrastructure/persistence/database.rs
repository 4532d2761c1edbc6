//! Registrant store connection management

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl PoolSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/yourturn".to_string(),
            max_connections: 5,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600), // 10 minutes
        }
    }
}

/// Open the registrant store pool
pub async fn create_pool(settings: &PoolSettings) -> Result<PgPool, sqlx::Error> {
    info!(
        "Connecting to registrant store {} (max {} connections)",
        mask_password(&settings.url),
        settings.max_connections
    );

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.connect_timeout)
        .idle_timeout(Some(settings.idle_timeout))
        .connect(&settings.url)
        .await?;

    info!("Registrant store connected");
    Ok(pool)
}

/// Create the `contacts` table if it does not exist yet
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running registrant store migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Hide the password of a connection string before logging it
fn mask_password(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            // the scheme's colon means a user without a password
            if url[..colon_pos].contains("://") {
                let mut masked = url.to_string();
                masked.replace_range(colon_pos + 1..at_pos, "****");
                return masked;
            }
        }
    }
    url.to_string()
}
