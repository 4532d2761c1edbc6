//! Telephony provider adapters

pub mod twilio;

pub use twilio::TwilioClient;
