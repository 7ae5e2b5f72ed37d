//! Run Confirmation use case
//!
//! Drives a [`ConfirmationScheduler`] against an [`EndorsementChannel`]:
//! resolve the next organization's peer, send the proposal, classify the
//! reply with the injected [`MatchStrategy`], and let the scheduler decide
//! whether to stop, restart or advance. Sends are strictly sequential.

use crate::config::{SchedulerParams, TransportFailurePolicy};
use crate::ports::confirmation_logger::{
    ConfirmationEvent, ConfirmationLogger, NoConfirmationLogger, RUN_FAILED, RUN_FINISHED,
    RUN_STARTED,
};
use crate::ports::endorsement_channel::{ChannelError, EndorsementChannel};
use crate::ports::progress::{ConfirmationProgress, NoProgress};
use confirm_domain::{
    AutomatonModel, ConfirmationScheduler, ConsensusResult, DomainError, Endorsement,
    MatchStrategy, ModelArtifact, Organization, ProposalResponse, StepDecision, StepReport,
    TransactionProposal,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during a confirmation run
///
/// Failures after the first send carry the result accumulated so far.
#[derive(Error, Debug)]
pub enum RunConfirmationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Cannot find organization with name {organization} (step {step})")]
    UnknownOrganization {
        organization: Organization,
        step: u32,
        partial: Box<ConsensusResult>,
    },

    #[error("Proposal to {organization} failed at step {step}: {source}")]
    Transport {
        organization: Organization,
        step: u32,
        source: ChannelError,
        partial: Box<ConsensusResult>,
    },
}

impl RunConfirmationError {
    /// Result accumulated before a mid-run failure
    pub fn partial_result(&self) -> Option<&ConsensusResult> {
        match self {
            RunConfirmationError::Domain(_) => None,
            RunConfirmationError::UnknownOrganization { partial, .. }
            | RunConfirmationError::Transport { partial, .. } => Some(partial),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RunConfirmationError::Domain(e) if e.is_not_found())
    }
}

/// Input for the RunConfirmation use case
#[derive(Debug, Clone)]
pub struct RunConfirmationInput {
    /// Model-check result to replay
    pub model_id: u32,
    /// Proposal sent to every contacted peer
    pub proposal: TransactionProposal,
    /// Previously obtained correct response, if any
    pub reference: Option<ProposalResponse>,
}

impl RunConfirmationInput {
    pub fn new(model_id: u32, proposal: TransactionProposal) -> Self {
        Self {
            model_id,
            proposal,
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: ProposalResponse) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Classification strategy implied by the reference
    pub fn match_strategy(&self) -> MatchStrategy {
        MatchStrategy::from_reference(self.reference.clone())
    }
}

/// Use case for confirming a response against the automaton
pub struct RunConfirmationUseCase<C: EndorsementChannel + 'static> {
    channel: Arc<C>,
    params: SchedulerParams,
    logger: Arc<dyn ConfirmationLogger>,
}

impl<C: EndorsementChannel + 'static> RunConfirmationUseCase<C> {
    pub fn new(channel: Arc<C>) -> Self {
        Self {
            channel,
            params: SchedulerParams::default(),
            logger: Arc::new(NoConfirmationLogger),
        }
    }

    pub fn with_params(mut self, params: SchedulerParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConfirmationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn params(&self) -> &SchedulerParams {
        &self.params
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        artifact: &ModelArtifact,
        input: RunConfirmationInput,
    ) -> Result<ConsensusResult, RunConfirmationError> {
        self.execute_with_progress(artifact, input, &NoProgress)
            .await
    }

    /// Select the model by id and run the confirmation with progress callbacks
    pub async fn execute_with_progress(
        &self,
        artifact: &ModelArtifact,
        input: RunConfirmationInput,
        progress: &dyn ConfirmationProgress,
    ) -> Result<ConsensusResult, RunConfirmationError> {
        let model = artifact.select_model(input.model_id)?;
        let strategy = input.match_strategy();
        self.confirm(&model, &strategy, &input.proposal, progress)
            .await
    }

    /// Run the confirmation walk over an already selected model
    pub async fn confirm(
        &self,
        model: &AutomatonModel,
        strategy: &MatchStrategy,
        proposal: &TransactionProposal,
        progress: &dyn ConfirmationProgress,
    ) -> Result<ConsensusResult, RunConfirmationError> {
        let mut scheduler = ConfirmationScheduler::new(model, self.params.limits)?;

        info!(
            "Starting confirmation with model {} over {} organizations ({})",
            model.id,
            model.organization_count(),
            strategy
        );
        self.logger.log(ConfirmationEvent::new(
            RUN_STARTED,
            json!({
                "model_id": model.id,
                "organizations": model.organizations,
                "strategy": strategy.description(),
                "max_requests_per_organization": self.params.limits.max_requests_per_organization,
                "max_total_messages": self.params.limits.max_total_messages,
            }),
        ));
        progress.on_run_start(model, &self.params.limits);

        while let Some(organization) = scheduler.next_organization().cloned() {
            let attempt = scheduler.result().stats.proposals_sent + 1;

            let peer = match self.channel.resolve_node(&organization) {
                Ok(peer) => peer,
                Err(source) => {
                    let partial = Box::new(scheduler.into_result());
                    let error = if source.is_unknown_organization() {
                        RunConfirmationError::UnknownOrganization {
                            organization,
                            step: attempt,
                            partial,
                        }
                    } else {
                        RunConfirmationError::Transport {
                            organization,
                            step: attempt,
                            source,
                            partial,
                        }
                    };
                    return Err(self.fail(error));
                }
            };

            let Some(step) = scheduler.begin_step() else {
                break;
            };

            info!("Sending for confirmation to {}.", organization);
            progress.on_send(&step);
            self.logger.log(ConfirmationEvent::new(
                "proposal_sent",
                json!({
                    "organization": organization,
                    "peer": peer.name,
                    "sequence": step.sequence,
                    "prior_requests": step.prior_count,
                }),
            ));

            let (endorsement, raw) = match self.channel.send_proposal(&peer, proposal).await {
                Ok(response) => (strategy.classify(&response), Some(response)),
                Err(source) => match self.params.on_transport_error {
                    TransportFailurePolicy::Abort => {
                        let error = RunConfirmationError::Transport {
                            organization,
                            step: step.sequence,
                            source,
                            partial: Box::new(scheduler.into_result()),
                        };
                        return Err(self.fail(error));
                    }
                    TransportFailurePolicy::TreatAsReject => {
                        warn!(
                            "Send to {} failed ({}); counting it as a reject",
                            organization, source
                        );
                        (Endorsement::Reject, None)
                    }
                },
            };

            info!(
                "Send for confirmation to {} finished with response {}",
                organization,
                endorsement.is_accept()
            );

            let report = scheduler.complete_step(step, endorsement, raw);
            self.record_step(&report);
            progress.on_step_complete(&report);

            if report.decision.is_terminal() {
                break;
            }
        }

        let result = scheduler.into_result();
        self.logger.log(ConfirmationEvent::new(
            RUN_FINISHED,
            json!({
                "agreement_reached": result.agreement_reached,
                "accepted": result.accepted_count(),
                "stats": result.stats,
            }),
        ));
        progress.on_run_complete(&result);
        Ok(result)
    }

    /// Trace and log a completed step at its decision point
    fn record_step(&self, report: &StepReport) {
        if report.pruned_backoff {
            warn!(
                "Organization {} has reached the max amount of requests. \
                 Remove backward transition {} for this organization.",
                report.organization, report.responses
            );
            self.logger.log(ConfirmationEvent::new(
                "backoff_pruned",
                json!({
                    "organization": report.organization,
                    "vector": report.responses,
                }),
            ));
        }

        match report.decision {
            StepDecision::Agreement => {
                info!(
                    "Consensus is reached with {} messages",
                    report.messages_charged
                );
            }
            StepDecision::MessageBudgetExhausted => {
                warn!("Max number of messages was sent. Consensus is not reached.");
            }
            StepDecision::Restart => {
                info!(
                    "Make backward transition from organization {}",
                    report.organization
                );
            }
            StepDecision::TreeExhausted => {
                info!("Reached the end of the tree without consensus");
            }
            StepDecision::Advance => {
                debug!("Vector {} advances past {}", report.responses, report.organization);
            }
        }

        self.logger.log(ConfirmationEvent::new(
            "step_completed",
            json!({
                "organization": report.organization,
                "accepted": report.endorsement.is_accept(),
                "vector": report.responses,
                "decision": report.decision.as_str(),
                "messages_charged": report.messages_charged,
            }),
        ));
    }

    fn fail(&self, error: RunConfirmationError) -> RunConfirmationError {
        warn!("Confirmation run failed: {}", error);
        self.logger.log(ConfirmationEvent::new(
            RUN_FAILED,
            json!({
                "error": error.to_string(),
                "accepted": error.partial_result().map(|r| r.accepted_count()),
            }),
        ));
        error
    }
}
