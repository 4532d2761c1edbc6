//! PostgreSQL implementation of the registrant repository

use crate::domain::registrant::{Registrant, RegistrantRepository};
use crate::domain::shared::error::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error};

pub struct PgRegistrantRepository {
    pool: PgPool,
}

impl PgRegistrantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrantRepository for PgRegistrantRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Registrant>> {
        debug!("Querying contacts for {:?}", name);

        // Exact match on the lowered name, never a pattern
        let registrant = sqlx::query_as::<_, Registrant>(
            r#"
            SELECT name, phone
            FROM contacts
            WHERE lower(name) = lower($1)
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to query contacts: {}", e);
            e
        })?;

        Ok(registrant)
    }
}
