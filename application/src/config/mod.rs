//! Application-level configuration.
//!
//! - [`SchedulerParams`] — retry budget caps and transport failure handling

pub mod scheduler_params;

pub use scheduler_params::{SchedulerParams, TransportFailurePolicy};
