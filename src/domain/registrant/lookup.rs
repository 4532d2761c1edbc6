//! Lookup Service - resolves free-text names to registrants

use super::entity::Registrant;
use super::repository::RegistrantRepository;
use crate::domain::shared::error::{DomainError, Result};
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Collapse runs of whitespace to single spaces and trim both ends
pub fn normalize_name(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves submitted names against the registrant store
pub struct RegistrantLookup {
    repository: Arc<dyn RegistrantRepository>,
}

impl RegistrantLookup {
    pub fn new(repository: Arc<dyn RegistrantRepository>) -> Self {
        Self { repository }
    }

    /// Resolve a submitted name to a registrant.
    ///
    /// Absent or blank input fails with [`DomainError::MissingInput`] before
    /// the store is queried. An unknown name is [`DomainError::NotFound`].
    pub async fn resolve(&self, input: Option<&str>) -> Result<Registrant> {
        let name = normalize_name(input.unwrap_or_default());
        if name.is_empty() {
            counter!("yourturn_lookups_total", "outcome" => "missing_input").increment(1);
            return Err(DomainError::MissingInput("username".to_string()));
        }

        debug!("Looking up registrant {:?}", name);

        match self.repository.find_by_name(&name).await {
            Ok(Some(registrant)) => {
                info!("Resolved {:?} to {}", name, registrant.phone);
                counter!("yourturn_lookups_total", "outcome" => "found").increment(1);
                Ok(registrant)
            }
            Ok(None) => {
                info!("No registrant named {:?}", name);
                counter!("yourturn_lookups_total", "outcome" => "not_found").increment(1);
                Err(DomainError::NotFound(name))
            }
            Err(e) => {
                error!("Registrant store failed: {}", e);
                counter!("yourturn_lookups_total", "outcome" => "error").increment(1);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registrant::repository::MockRegistrantRepository;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_name("  Jane   Doe "), "Jane Doe");
        assert_eq!(normalize_name("Jane\t\nDoe"), "Jane Doe");
        assert_eq!(normalize_name("   "), "");
    }

    #[tokio::test]
    async fn test_resolve_queries_normalized_name() {
        let mut repo = MockRegistrantRepository::new();
        repo.expect_find_by_name()
            .withf(|name| name == "Jane Doe")
            .times(1)
            .returning(|_| Ok(Some(Registrant::new("Jane Doe", "+15551234567"))));

        let lookup = RegistrantLookup::new(Arc::new(repo));
        let registrant = lookup.resolve(Some("  Jane   Doe ")).await.unwrap();
        assert_eq!(registrant.phone, "+15551234567");
    }

    #[tokio::test]
    async fn test_missing_input_skips_store() {
        let mut repo = MockRegistrantRepository::new();
        repo.expect_find_by_name().never();

        let lookup = RegistrantLookup::new(Arc::new(repo));
        assert!(matches!(
            lookup.resolve(None).await,
            Err(DomainError::MissingInput(_))
        ));
        assert!(matches!(
            lookup.resolve(Some("  \t ")).await,
            Err(DomainError::MissingInput(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_name_is_not_found() {
        let mut repo = MockRegistrantRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));

        let lookup = RegistrantLookup::new(Arc::new(repo));
        assert_eq!(
            lookup.resolve(Some("Nobody")).await,
            Err(DomainError::NotFound("Nobody".to_string()))
        );
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut repo = MockRegistrantRepository::new();
        repo.expect_find_by_name()
            .returning(|_| Err(DomainError::Store("connection refused".to_string())));

        let lookup = RegistrantLookup::new(Arc::new(repo));
        assert_eq!(
            lookup.resolve(Some("Jane Doe")).await,
            Err(DomainError::Store("connection refused".to_string()))
        );
    }
}
