//! Artifact loading
//!
//! Reads the model checker's JSON output and reference responses from disk.

mod loader;

pub use loader::{ArtifactError, ArtifactLoader};
