//! HTTP interface: pages, the provider webhook, polling and push

pub mod call_handler;
pub mod metrics_handler;
pub mod pages;
pub mod router;
pub mod state;
pub mod status_handler;
pub mod ws_handler;

pub use metrics_handler::{detached_metrics, init_metrics};
pub use router::build_router;
pub use state::AppState;
