//! Registrant repository interface

use super::entity::Registrant;
use crate::domain::shared::error::Result;
use async_trait::async_trait;

/// Read-only access to the registrant document store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrantRepository: Send + Sync {
    /// Find the registrant whose name equals `name`, ignoring case
    async fn find_by_name(&self, name: &str) -> Result<Option<Registrant>>;
}
