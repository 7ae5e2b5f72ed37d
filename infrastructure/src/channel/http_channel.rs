//! HTTP endorsement channel
//!
//! Posts the proposal as JSON to `{endpoint}/proposal` on the peer serving
//! an organization and decodes the peer's `ProposalResponse` reply.

use async_trait::async_trait;
use confirm_application::{ChannelError, EndorsementChannel, EndorsingPeer};
use confirm_domain::{Organization, ProposalResponse, TransactionProposal};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Endorsement channel talking to peers over HTTP
pub struct HttpEndorsementChannel {
    client: reqwest::Client,
    peers: HashMap<Organization, EndorsingPeer>,
}

impl HttpEndorsementChannel {
    /// Build a channel over `peers`; later peers for the same organization win.
    pub fn new(peers: Vec<EndorsingPeer>, timeout: Duration) -> Result<Self, ChannelError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChannelError::Transport(e.to_string()))?;

        let peers = peers
            .into_iter()
            .map(|peer| (peer.organization.clone(), peer))
            .collect();

        Ok(Self { client, peers })
    }

    /// URL the proposal is posted to for `endpoint`
    pub fn proposal_url(endpoint: &str) -> String {
        format!("{}/proposal", endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl EndorsementChannel for HttpEndorsementChannel {
    fn resolve_node(&self, organization: &Organization) -> Result<EndorsingPeer, ChannelError> {
        self.peers
            .get(organization)
            .filter(|peer| peer.endpoint.is_some())
            .cloned()
            .ok_or_else(|| ChannelError::UnknownOrganization(organization.to_string()))
    }

    async fn send_proposal(
        &self,
        peer: &EndorsingPeer,
        proposal: &TransactionProposal,
    ) -> Result<ProposalResponse, ChannelError> {
        let endpoint = peer
            .endpoint
            .as_deref()
            .ok_or_else(|| ChannelError::UnknownOrganization(peer.organization.to_string()))?;
        let url = Self::proposal_url(endpoint);
        debug!("POST {} for {}", url, peer.name);

        let response = self
            .client
            .post(&url)
            .json(proposal)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChannelError::Timeout
                } else {
                    ChannelError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChannelError::Transport(format!(
                "HTTP error from {}: {} {}",
                peer.name,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let mut reply: ProposalResponse = response
            .json()
            .await
            .map_err(|e| ChannelError::Transport(format!("invalid response body: {}", e)))?;
        if reply.peer.is_empty() {
            reply.peer = peer.name.clone();
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposal_url() {
        assert_eq!(
            HttpEndorsementChannel::proposal_url("http://localhost:7051/"),
            "http://localhost:7051/proposal"
        );
        assert_eq!(
            HttpEndorsementChannel::proposal_url("http://peer0:7051"),
            "http://peer0:7051/proposal"
        );
    }

    #[test]
    fn test_resolve_requires_endpoint() {
        let channel = HttpEndorsementChannel::new(
            vec![
                EndorsingPeer::new("peer0.org1", Organization::from("Org1"))
                    .with_endpoint("http://localhost:7051"),
                EndorsingPeer::new("peer0.org2", Organization::from("Org2")),
            ],
            DEFAULT_REQUEST_TIMEOUT,
        )
        .unwrap();

        assert!(channel.resolve_node(&Organization::from("Org1")).is_ok());
        assert!(
            channel
                .resolve_node(&Organization::from("Org2"))
                .unwrap_err()
                .is_unknown_organization()
        );
        assert!(
            channel
                .resolve_node(&Organization::from("Org3"))
                .unwrap_err()
                .is_unknown_organization()
        );
    }
}
