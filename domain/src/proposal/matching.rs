//! Response classification strategies
//!
//! Deciding whether a peer's response counts as an accept is a pluggable
//! strategy so the scheduler never special-cases how a reference is supplied.

use super::response::ProposalResponse;
use crate::automaton::Endorsement;
use serde::{Deserialize, Serialize};

/// Marker the heuristic strategy looks for in a payload
pub const HEURISTIC_MARKER: &str = "true";

/// Strategy for classifying a peer response as accept or reject
///
/// - `Exact`: successful status and payload identical to the reference
/// - `Heuristic`: successful status and payload containing `"true"`
///
/// # Example
///
/// ```
/// use confirm_domain::automaton::Endorsement;
/// use confirm_domain::proposal::{MatchStrategy, ProposalResponse};
///
/// let reference = ProposalResponse::success("peer0.org1", "asset1:blue");
/// let strategy = MatchStrategy::from_reference(Some(reference));
///
/// let same = ProposalResponse::success("peer0.org2", "asset1:blue");
/// let other = ProposalResponse::success("peer0.org3", "asset1:red");
///
/// assert_eq!(strategy.classify(&same), Endorsement::Accept);
/// assert_eq!(strategy.classify(&other), Endorsement::Reject);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Compare payloads against a previously obtained correct response
    Exact(ProposalResponse),
    /// No reference available: accept payloads that indicate `true`
    Heuristic,
}

impl MatchStrategy {
    /// Exact matching when a reference is supplied, heuristic otherwise
    pub fn from_reference(reference: Option<ProposalResponse>) -> Self {
        match reference {
            Some(reference) => MatchStrategy::Exact(reference),
            None => MatchStrategy::Heuristic,
        }
    }

    pub fn is_accepted(&self, response: &ProposalResponse) -> bool {
        if !response.is_success() {
            return false;
        }

        match self {
            MatchStrategy::Exact(reference) => response.payload == reference.payload,
            MatchStrategy::Heuristic => response.payload.contains(HEURISTIC_MARKER),
        }
    }

    pub fn classify(&self, response: &ProposalResponse) -> Endorsement {
        Endorsement::from_accepted(self.is_accepted(response))
    }

    pub fn description(&self) -> &'static str {
        match self {
            MatchStrategy::Exact(_) => "exact payload match",
            MatchStrategy::Heuristic => "heuristic (payload contains \"true\")",
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_requires_success_status() {
        let strategy = MatchStrategy::Exact(ProposalResponse::success("ref", "42"));
        let mut failed = ProposalResponse::success("peer", "42");
        failed.status = 500;

        assert!(!strategy.is_accepted(&failed));
        assert!(strategy.is_accepted(&ProposalResponse::success("peer", "42")));
    }

    #[test]
    fn test_exact_compares_payload_only() {
        let strategy = MatchStrategy::Exact(ProposalResponse::success("peer0.org1", "42"));
        // Peer name differs but payload is the same
        assert!(strategy.is_accepted(&ProposalResponse::success("peer0.org9", "42")));
        assert!(!strategy.is_accepted(&ProposalResponse::success("peer0.org1", "43")));
    }

    #[test]
    fn test_heuristic_looks_for_true() {
        let strategy = MatchStrategy::Heuristic;
        assert_eq!(
            strategy.classify(&ProposalResponse::success("p", "{\"valid\":true}")),
            Endorsement::Accept
        );
        assert_eq!(
            strategy.classify(&ProposalResponse::success("p", "false")),
            Endorsement::Reject
        );
        assert_eq!(
            strategy.classify(&ProposalResponse::failure("p", 500, "true")),
            Endorsement::Reject
        );
    }

    #[test]
    fn test_from_reference() {
        assert_eq!(MatchStrategy::from_reference(None), MatchStrategy::Heuristic);
        assert!(matches!(
            MatchStrategy::from_reference(Some(ProposalResponse::success("p", "x"))),
            MatchStrategy::Exact(_)
        ));
    }
}
