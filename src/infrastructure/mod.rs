//! Infrastructure layer - Technical implementations
//!
//! This layer contains:
//! - Registrant store implementations (PostgreSQL, in-memory)
//! - The telephony provider client

pub mod persistence;
pub mod telephony;
