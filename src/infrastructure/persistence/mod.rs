//! Registrant store implementations

pub mod memory;
#[cfg(feature = "postgres")]
pub mod database;
#[cfg(feature = "postgres")]
pub mod registrant_repository;

pub use memory::InMemoryRegistrantRepository;
#[cfg(feature = "postgres")]
pub use database::{create_pool, run_migrations, PoolSettings};
#[cfg(feature = "postgres")]
pub use registrant_repository::PgRegistrantRepository;
