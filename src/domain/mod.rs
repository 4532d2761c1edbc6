//! Domain layer - Core business logic and rules
//!
//! This layer contains:
//! - Registrants and the name lookup over the document store
//! - Call dispatch through the telephony provider port
//! - The answered-call tracker and the push events it emits

pub mod call;
pub mod registrant;
pub mod shared;

// Re-export commonly used types
pub use shared::{DomainError, Result};
