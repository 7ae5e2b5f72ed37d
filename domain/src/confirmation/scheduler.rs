//! Confirmation scheduler - the automaton walk as an explicit state machine
//!
//! The scheduler owns all per-run state and never performs I/O. A driver
//! alternates two calls per polled organization:
//!
//! ```text
//!   begin_step()  ─▶ charge budgets, hand out the organization to contact
//!        │
//!   (driver sends the proposal and classifies the reply)
//!        │
//!   complete_step() ─▶ fold the outcome into the vector, decide:
//!        Agreement | MessageBudgetExhausted | Restart | TreeExhausted | Advance
//! ```
//!
//! Global message accounting charges one message per send, plus one per
//! restart or advance. The run stops once the charged total reaches
//! `max_total_messages`, checked right after each send, so the final total is
//! either the limit or the limit plus one.

use super::budget::{BudgetLimits, RetryBudget};
use super::result::ConsensusResult;
use crate::automaton::{AutomatonModel, BackoffTransitions, Endorsement, ResponseVector};
use crate::core::error::DomainError;
use crate::core::organization::Organization;
use crate::proposal::ProposalResponse;
use std::collections::VecDeque;

/// What the walk does after folding in one outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDecision {
    /// A consensus vector was reached
    Agreement,
    /// The global message budget is spent
    MessageBudgetExhausted,
    /// A backoff vector was reached; the walk starts over
    Restart,
    /// Every slot is filled without reaching consensus
    TreeExhausted,
    /// Move on to the next organization
    Advance,
}

impl StepDecision {
    /// Whether the run stops after this decision
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StepDecision::Agreement
                | StepDecision::MessageBudgetExhausted
                | StepDecision::TreeExhausted
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StepDecision::Agreement => "agreement",
            StepDecision::MessageBudgetExhausted => "message_budget_exhausted",
            StepDecision::Restart => "restart",
            StepDecision::TreeExhausted => "tree_exhausted",
            StepDecision::Advance => "advance",
        }
    }
}

impl std::fmt::Display for StepDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A send that has been charged but whose outcome is not yet known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStep {
    /// Organization to contact
    pub organization: Organization,
    /// Requests sent to this organization before this one
    pub prior_count: u32,
    /// 1-based sequence number of this send within the run
    pub sequence: u32,
    /// Slot in the response vector this outcome fills
    pub slot: usize,
}

/// Everything a driver needs to report about a completed step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub organization: Organization,
    pub endorsement: Endorsement,
    pub decision: StepDecision,
    /// Vector after the outcome was written, before any restart reset
    pub responses: ResponseVector,
    /// Whether a backoff vector was pruned on this step
    pub pruned_backoff: bool,
    /// Global messages charged after this step
    pub messages_charged: u32,
}

/// Per-run automaton walk over a borrowed model
#[derive(Debug)]
pub struct ConfirmationScheduler<'m> {
    model: &'m AutomatonModel,
    limits: BudgetLimits,
    backoff: BackoffTransitions,
    organizations: VecDeque<Organization>,
    responses: ResponseVector,
    cursor: usize,
    budget: RetryBudget,
    result: ConsensusResult,
    finished: bool,
}

impl<'m> ConfirmationScheduler<'m> {
    /// Start a run against `model`.
    ///
    /// Fails with `InvalidModel` before any state is built.
    pub fn new(model: &'m AutomatonModel, limits: BudgetLimits) -> Result<Self, DomainError> {
        model.validate()?;

        Ok(Self {
            model,
            limits,
            backoff: model.backoff_working_set(),
            organizations: model.organizations.iter().cloned().collect(),
            responses: ResponseVector::unknown(model.organization_count()),
            cursor: 0,
            budget: RetryBudget::new(),
            result: ConsensusResult::new(),
            finished: false,
        })
    }

    /// Organization the next step will contact, without charging anything
    pub fn next_organization(&self) -> Option<&Organization> {
        if self.finished {
            return None;
        }
        self.organizations.front()
    }

    /// Charge the next send and hand out the organization to contact.
    ///
    /// Returns `None` once the run has reached a terminal decision.
    pub fn begin_step(&mut self) -> Option<PendingStep> {
        if self.finished {
            return None;
        }
        let organization = self.organizations.front()?.clone();

        let prior_count = self.budget.count(&organization);
        self.budget.increment(&organization);
        self.budget.increment_global();
        self.result.stats.proposals_sent += 1;

        Some(PendingStep {
            organization,
            prior_count,
            sequence: self.result.stats.proposals_sent,
            slot: self.cursor,
        })
    }

    /// Fold the outcome of `step` into the walk and decide what happens next.
    ///
    /// `raw` is kept in the result only when `endorsement` is an accept.
    pub fn complete_step(
        &mut self,
        step: PendingStep,
        endorsement: Endorsement,
        raw: Option<ProposalResponse>,
    ) -> StepReport {
        if endorsement.is_accept()
            && let Some(response) = raw
        {
            self.result.push_accepted(response);
        }

        self.responses.set(step.slot, endorsement);
        let responses = self.responses.clone();

        let mut backoff_hit = self.backoff.matches(&self.responses);
        let mut pruned_backoff = false;
        if backoff_hit && step.prior_count >= self.limits.max_requests_per_organization {
            pruned_backoff = self.backoff.remove(&self.responses);
            backoff_hit = self.backoff.matches(&self.responses);
        }

        let decision = if self.model.is_consensus(&self.responses) {
            self.result.mark_agreement();
            StepDecision::Agreement
        } else if self.budget.total() >= self.limits.max_total_messages {
            StepDecision::MessageBudgetExhausted
        } else if backoff_hit && !endorsement.is_accept() {
            self.restart();
            StepDecision::Restart
        } else if self.responses.is_exhausted() {
            StepDecision::TreeExhausted
        } else {
            self.organizations.pop_front();
            self.cursor += 1;
            self.budget.increment_global();
            StepDecision::Advance
        };

        if decision.is_terminal() {
            self.finished = true;
        }

        StepReport {
            organization: step.organization,
            endorsement,
            decision,
            responses,
            pruned_backoff,
            messages_charged: self.budget.total(),
        }
    }

    fn restart(&mut self) {
        self.responses.clear();
        self.cursor = 0;
        self.organizations = self.model.organizations.iter().cloned().collect();
        self.budget.increment_global();
        self.result.stats.restarts += 1;
    }

    pub fn model(&self) -> &AutomatonModel {
        self.model
    }

    pub fn limits(&self) -> BudgetLimits {
        self.limits
    }

    pub fn responses(&self) -> &ResponseVector {
        &self.responses
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Organizations still to be polled this round, front first
    pub fn remaining_organizations(&self) -> impl Iterator<Item = &Organization> {
        self.organizations.iter()
    }

    pub fn budget(&self) -> &RetryBudget {
        &self.budget
    }

    pub fn backoff(&self) -> &BackoffTransitions {
        &self.backoff
    }

    pub fn message_count(&self) -> u32 {
        self.budget.total()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Result accumulated so far, with counters filled in
    pub fn result(&self) -> ConsensusResult {
        self.fill_counters(self.result.clone())
    }

    /// Consume the scheduler, returning the accumulated result
    pub fn into_result(mut self) -> ConsensusResult {
        let result = std::mem::take(&mut self.result);
        self.fill_counters(result)
    }

    fn fill_counters(&self, mut result: ConsensusResult) -> ConsensusResult {
        result.stats.messages_charged = self.budget.total();
        result.stats.pruned_backoffs = self.backoff.pruned_count();
        result.requests_per_organization = self.budget.per_organization().into_iter().collect();
        result
    }
}
