//! Logging infrastructure — structured confirmation event logging.
//!
//! Provides [`JsonlConfirmationLogger`], a JSONL file writer that implements
//! the [`ConfirmationLogger`](confirm_application::ConfirmationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConfirmationLogger;
