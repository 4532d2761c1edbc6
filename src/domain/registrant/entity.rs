//! Registrant entity

use crate::domain::shared::PhoneNumber;
use serde::{Deserialize, Serialize};

/// A person registered to be called when it is their turn.
///
/// Loaded out-of-band; this service never writes registrants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Registrant {
    pub name: String,
    pub phone: String,
}

impl Registrant {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }

    /// Call state key for this registrant
    pub fn phone_key(&self) -> PhoneNumber {
        PhoneNumber::new(&self.phone)
    }
}
