//! In-memory registrant store, optionally seeded from a JSON file

use crate::domain::registrant::{Registrant, RegistrantRepository};
use crate::domain::shared::error::{DomainError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Default, Clone)]
pub struct InMemoryRegistrantRepository {
    registrants: Arc<RwLock<Vec<Registrant>>>,
}

impl InMemoryRegistrantRepository {
    pub fn new(registrants: Vec<Registrant>) -> Self {
        Self {
            registrants: Arc::new(RwLock::new(registrants)),
        }
    }

    /// Load `[{"name": ..., "phone": ...}]` from `path`
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::Store(format!("cannot read {}: {}", path.display(), e)))?;
        let registrants: Vec<Registrant> = serde_json::from_str(&raw)
            .map_err(|e| DomainError::Store(format!("invalid seed file {}: {}", path.display(), e)))?;

        info!("Loaded {} registrants from {}", registrants.len(), path.display());
        Ok(Self::new(registrants))
    }

}

#[async_trait]
impl RegistrantRepository for InMemoryRegistrantRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Registrant>> {
        let wanted = name.to_lowercase();
        let registrants = self.registrants.read().await;
        Ok(registrants
            .iter()
            .find(|r| r.name.to_lowercase() == wanted)
            .cloned())
    }
}
