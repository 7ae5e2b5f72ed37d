//! Application layer for fabric-confirm
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{SchedulerParams, TransportFailurePolicy};
pub use ports::{
    confirmation_logger::{
        ConfirmationEvent, ConfirmationLogger, NoConfirmationLogger, RUN_FAILED, RUN_FINISHED,
        RUN_STARTED,
    },
    endorsement_channel::{ChannelError, EndorsementChannel, EndorsingPeer},
    progress::{ConfirmationProgress, NoProgress},
};
pub use use_cases::run_confirmation::{
    RunConfirmationError, RunConfirmationInput, RunConfirmationUseCase,
};
