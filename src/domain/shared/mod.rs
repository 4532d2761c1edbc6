//! Shared kernel - Common types used across the lookup, dispatch and tracking contexts

pub mod error;
pub mod events;
pub mod value_objects;

pub use error::{DomainError, Result};
pub use events::{EventBroadcaster, PushEvent};
pub use value_objects::PhoneNumber;
