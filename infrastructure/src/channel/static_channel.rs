//! In-process endorsement channel with scripted peers
//!
//! Each peer answers from a fixed list of responses, cycling back to the
//! start once the list is exhausted. Useful for dry runs of a model against
//! known peer behavior and for tests.

use async_trait::async_trait;
use confirm_application::{ChannelError, EndorsementChannel, EndorsingPeer};
use confirm_domain::{Organization, ProposalResponse, TransactionProposal};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

struct ScriptedPeer {
    peer: EndorsingPeer,
    responses: Vec<ProposalResponse>,
    next: usize,
}

/// Endorsement channel answering from scripted response sequences
#[derive(Default)]
pub struct StaticEndorsementChannel {
    peers: Mutex<HashMap<Organization, ScriptedPeer>>,
    contacted: Mutex<Vec<Organization>>,
}

impl StaticEndorsementChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a peer and the responses it gives, in order
    pub fn with_peer(mut self, peer: EndorsingPeer, responses: Vec<ProposalResponse>) -> Self {
        if let Ok(peers) = self.peers.get_mut() {
            peers.insert(
                peer.organization.clone(),
                ScriptedPeer {
                    peer,
                    responses,
                    next: 0,
                },
            );
        }
        self
    }

    /// Organizations contacted so far, in send order
    pub fn contacted(&self) -> Vec<Organization> {
        self.contacted
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EndorsementChannel for StaticEndorsementChannel {
    fn resolve_node(&self, organization: &Organization) -> Result<EndorsingPeer, ChannelError> {
        let peers = self
            .peers
            .lock()
            .map_err(|_| ChannelError::Transport("peer table poisoned".to_string()))?;

        peers
            .get(organization)
            .map(|scripted| scripted.peer.clone())
            .ok_or_else(|| ChannelError::UnknownOrganization(organization.to_string()))
    }

    async fn send_proposal(
        &self,
        peer: &EndorsingPeer,
        _proposal: &TransactionProposal,
    ) -> Result<ProposalResponse, ChannelError> {
        if let Ok(mut contacted) = self.contacted.lock() {
            contacted.push(peer.organization.clone());
        }

        let mut peers = self
            .peers
            .lock()
            .map_err(|_| ChannelError::Transport("peer table poisoned".to_string()))?;
        let scripted = peers
            .get_mut(&peer.organization)
            .ok_or_else(|| ChannelError::UnknownOrganization(peer.organization.to_string()))?;

        if scripted.responses.is_empty() {
            return Err(ChannelError::Transport(format!(
                "peer {} has no scripted responses",
                peer.name
            )));
        }

        let mut response = scripted.responses[scripted.next % scripted.responses.len()].clone();
        scripted.next += 1;
        if response.peer.is_empty() {
            response.peer = peer.name.clone();
        }

        debug!("Scripted peer {} answered with status {}", peer.name, response.status);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(org: &str) -> EndorsingPeer {
        EndorsingPeer::new(format!("peer0.{}", org.to_lowercase()), Organization::from(org))
    }

    #[test]
    fn test_resolve_unknown_organization() {
        let channel = StaticEndorsementChannel::new().with_peer(peer("Org1"), vec![]);

        assert!(channel.resolve_node(&Organization::from("Org1")).is_ok());
        assert_eq!(
            channel.resolve_node(&Organization::from("Org9")),
            Err(ChannelError::UnknownOrganization("Org9".to_string()))
        );
    }

    #[tokio::test]
    async fn test_responses_cycle_and_fill_peer_name() {
        let channel = StaticEndorsementChannel::new().with_peer(
            peer("Org1"),
            vec![
                ProposalResponse::success("", "first"),
                ProposalResponse::success("", "second"),
            ],
        );
        let target = channel.resolve_node(&Organization::from("Org1")).unwrap();
        let proposal = TransactionProposal::default();

        let payloads: Vec<String> = [
            channel.send_proposal(&target, &proposal).await.unwrap(),
            channel.send_proposal(&target, &proposal).await.unwrap(),
            channel.send_proposal(&target, &proposal).await.unwrap(),
        ]
        .into_iter()
        .map(|r| {
            assert_eq!(r.peer, "peer0.org1");
            r.payload
        })
        .collect();

        assert_eq!(payloads, vec!["first", "second", "first"]);
        assert_eq!(channel.contacted().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_script_is_transport_error() {
        let channel = StaticEndorsementChannel::new().with_peer(peer("Org1"), vec![]);
        let target = channel.resolve_node(&Organization::from("Org1")).unwrap();

        let result = channel
            .send_proposal(&target, &TransactionProposal::default())
            .await;
        assert!(matches!(result, Err(ChannelError::Transport(_))));
    }
}
