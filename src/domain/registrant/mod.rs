//! Registrant domain

pub mod entity;
pub mod lookup;
pub mod repository;

pub use entity::Registrant;
pub use lookup::{normalize_name, RegistrantLookup};
pub use repository::RegistrantRepository;
