//! Domain layer for fabric-confirm
//!
//! This crate contains the core confirmation logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Automaton
//!
//! An offline model checker produces, per model id, the response vectors that
//! prove consensus and the ones that require backing off. See [`automaton`].
//!
//! ## Confirmation
//!
//! A run replays the automaton one organization at a time, within a retry
//! budget, and reports the accepted responses. See [`confirmation`].

pub mod automaton;
pub mod confirmation;
pub mod core;
pub mod proposal;

// Re-export commonly used types
pub use automaton::{
    AutomatonModel, BackoffTransitions, Endorsement, ModelArtifact, ModelCheckResult,
    ResponseVector,
};
pub use confirmation::{
    BudgetLimits, ConfirmationScheduler, ConfirmationStats, ConsensusResult, PendingStep,
    RetryBudget, StepDecision, StepReport,
};
pub use core::{error::DomainError, organization::Organization};
pub use proposal::{MatchStrategy, ProposalResponse, SUCCESS_STATUS, TransactionProposal};
