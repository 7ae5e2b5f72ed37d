//! Progress notification port
//!
//! Defines the interface for reporting progress during a confirmation run.

use confirm_domain::{AutomatonModel, BudgetLimits, ConsensusResult, PendingStep, StepReport};

/// Callback for progress updates during a confirmation run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, progress bars, etc.)
pub trait ConfirmationProgress: Send + Sync {
    /// Called once the model is selected and validated
    fn on_run_start(&self, _model: &AutomatonModel, _limits: &BudgetLimits) {}

    /// Called right before a proposal is sent
    fn on_send(&self, step: &PendingStep);

    /// Called after the outcome has been folded into the walk
    fn on_step_complete(&self, report: &StepReport);

    /// Called when the run ends without error
    fn on_run_complete(&self, _result: &ConsensusResult) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ConfirmationProgress for NoProgress {
    fn on_send(&self, _step: &PendingStep) {}
    fn on_step_complete(&self, _report: &StepReport) {}
}
