//! Proposal request and response value objects

use serde::{Deserialize, Serialize};

/// Status a peer returns when it endorsed the proposal successfully
pub const SUCCESS_STATUS: i32 = 200;

/// The transaction proposal sent to each endorsing peer.
///
/// Opaque to the scheduler; only channels look inside.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionProposal {
    /// Chaincode to invoke
    pub chaincode_id: String,
    /// Chaincode function name
    pub function: String,
    /// Function arguments
    pub args: Vec<String>,
}

impl TransactionProposal {
    pub fn new(chaincode_id: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            chaincode_id: chaincode_id.into(),
            function: function.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// Raw response returned by a peer for a proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalResponse {
    /// Name of the peer that produced this response
    #[serde(default)]
    pub peer: String,
    /// Chaincode response status
    pub status: i32,
    /// Chaincode response payload
    #[serde(default)]
    pub payload: String,
    /// Optional status message
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl ProposalResponse {
    /// A successful response carrying `payload`
    pub fn success(peer: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            peer: peer.into(),
            status: SUCCESS_STATUS,
            payload: payload.into(),
            message: String::new(),
        }
    }

    /// A failed response with the given status
    pub fn failure(peer: impl Into<String>, status: i32, message: impl Into<String>) -> Self {
        Self {
            peer: peer.into(),
            status,
            payload: String::new(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}
