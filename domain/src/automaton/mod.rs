//! Automaton domain
//!
//! The offline model checker explores every accept/reject pattern the
//! endorsing organizations can produce and emits two sets of response
//! vectors: the patterns that prove consensus and the patterns that are known
//! dead ends. A confirmation run replays that automaton one organization at a
//! time.
//!
//! ```text
//!   [-1,-1,-1] ──A rejects──▶ [0,-1,-1]  (backoff: restart)
//!       │
//!   A accepts
//!       ▼
//!   [1,-1,-1] ──B accepts──▶ [1,1,-1] ──C accepts──▶ [1,1,1]  (consensus)
//! ```

pub mod artifact;
pub mod backoff;
pub mod model;
pub mod vector;

pub use artifact::{ModelArtifact, ModelCheckResult};
pub use backoff::BackoffTransitions;
pub use model::AutomatonModel;
pub use vector::{Endorsement, ResponseVector};
