//! YourTurn - phones a registrant when it is their turn
//!
//! A submitted name is resolved against the registrant store, a call is
//! placed through the telephony provider, and the provider's status
//! callbacks mark the call answered and notify the waiting browser.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::error::Result;
