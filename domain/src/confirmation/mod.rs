//! Confirmation domain
//!
//! A confirmation run checks that a previously obtained response really is
//! the consensus answer, contacting as few organizations as the automaton
//! allows.
//!
//! - [`ConfirmationScheduler`] — the step-by-step walk over one model
//! - [`RetryBudget`] / [`BudgetLimits`] — request counters and their caps
//! - [`ConsensusResult`] — accepted responses and the agreement flag

pub mod budget;
pub mod result;
pub mod scheduler;

pub use budget::{BudgetLimits, RetryBudget};
pub use result::{ConfirmationStats, ConsensusResult};
pub use scheduler::{ConfirmationScheduler, PendingStep, StepDecision, StepReport};
