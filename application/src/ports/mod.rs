//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod confirmation_logger;
pub mod endorsement_channel;
pub mod progress;
