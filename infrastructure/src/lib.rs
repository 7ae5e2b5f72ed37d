//! Infrastructure layer for fabric-confirm
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus artifact and configuration file loading.

pub mod artifact;
pub mod channel;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use artifact::{ArtifactError, ArtifactLoader};
#[cfg(feature = "http-channel")]
pub use channel::{DEFAULT_REQUEST_TIMEOUT, HttpEndorsementChannel};
pub use channel::StaticEndorsementChannel;
pub use config::{
    ConfigLoader, ConfigValidationError, FileArtifactConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FilePeerConfig, FileSchedulerConfig,
};
pub use logging::JsonlConfirmationLogger;
