//! Call bounded context - placing calls and tracking whether they were answered

pub mod callback;
pub mod dispatcher;
pub mod provider;
pub mod tracker;

pub use callback::{CallbackAddress, CallbackSigner};
pub use dispatcher::{CallDispatcher, DispatchOutcome, DispatchSettings};
pub use provider::{CallProvider, OutboundCall, PlacedCall};
pub use tracker::{CallTracker, StatusTransition};
