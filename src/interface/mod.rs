//! Interface layer - External interfaces
//!
//! This layer handles:
//! - HTML pages and the call submission form
//! - The telephony provider's status webhook
//! - Polling and WebSocket push for answered calls

pub mod api;
