//! Configuration file loading for fabric-confirm
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `FABRIC_CONFIRM_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./confirm.toml` or `./.confirm.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/fabric-confirm/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileArtifactConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FilePeerConfig, FileSchedulerConfig,
};
pub use loader::ConfigLoader;
