//! Endorsement channel port
//!
//! Defines how the application layer reaches endorsing peers. Adapters
//! (in-process scripted peers, HTTP peers) live in the infrastructure layer.

use async_trait::async_trait;
use confirm_domain::{Organization, ProposalResponse, TransactionProposal};
use thiserror::Error;

/// Errors that can occur at the channel boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("Cannot find organization with name {0}")]
    UnknownOrganization(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timeout")]
    Timeout,
}

impl ChannelError {
    pub fn is_unknown_organization(&self) -> bool {
        matches!(self, ChannelError::UnknownOrganization(_))
    }
}

/// The contactable peer standing in for an organization during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndorsingPeer {
    /// Peer name, as reported in its responses
    pub name: String,
    /// Organization the peer endorses for
    pub organization: Organization,
    /// Network address, when the channel needs one
    pub endpoint: Option<String>,
}

impl EndorsingPeer {
    pub fn new(name: impl Into<String>, organization: Organization) -> Self {
        Self {
            name: name.into(),
            organization,
            endpoint: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

/// Channel for sending proposals to endorsing peers
///
/// The scheduler sends at most one proposal at a time and awaits its
/// response before choosing the next organization.
#[async_trait]
pub trait EndorsementChannel: Send + Sync {
    /// Resolve the peer to contact for `organization`
    fn resolve_node(&self, organization: &Organization) -> Result<EndorsingPeer, ChannelError>;

    /// Send the proposal to a single peer and return its raw response
    async fn send_proposal(
        &self,
        peer: &EndorsingPeer,
        proposal: &TransactionProposal,
    ) -> Result<ProposalResponse, ChannelError>;
}
