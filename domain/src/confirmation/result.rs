//! Confirmation result - the terminal artifact of a run

use crate::core::organization::Organization;
use crate::proposal::ProposalResponse;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counters describing how a run got to its result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationStats {
    /// Messages charged against the global budget
    pub messages_charged: u32,
    /// Proposals actually sent to peers
    pub proposals_sent: u32,
    /// Backoff restarts taken
    pub restarts: u32,
    /// Backoff vectors pruned because an organization hit its cap
    pub pruned_backoffs: u32,
}

/// Accepted responses plus whether agreement was reached
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// Every response classified as accept, in the order received
    pub responses: Vec<ProposalResponse>,
    /// Whether a consensus vector was reached
    pub agreement_reached: bool,
    /// Run counters
    pub stats: ConfirmationStats,
    /// Proposals sent to each contacted organization
    #[serde(default)]
    pub requests_per_organization: BTreeMap<Organization, u32>,
}

impl ConsensusResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepted_count(&self) -> usize {
        self.responses.len()
    }

    pub fn is_agreement_reached(&self) -> bool {
        self.agreement_reached
    }

    pub(crate) fn push_accepted(&mut self, response: ProposalResponse) {
        self.responses.push(response);
    }

    pub(crate) fn mark_agreement(&mut self) {
        self.agreement_reached = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_result_is_empty() {
        let result = ConsensusResult::new();
        assert!(!result.is_agreement_reached());
        assert_eq!(result.accepted_count(), 0);
        assert_eq!(result.stats, ConfirmationStats::default());
    }

    #[test]
    fn test_accumulates_responses() {
        let mut result = ConsensusResult::new();
        result.push_accepted(ProposalResponse::success("peer0", "ok"));
        result.mark_agreement();

        assert_eq!(result.accepted_count(), 1);
        assert!(result.is_agreement_reached());
    }
}
