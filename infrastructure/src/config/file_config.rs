//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.
//!
//! ```toml
//! [scheduler]
//! max_requests_per_organization = 10
//! max_total_messages = 30
//! on_transport_error = "abort"
//!
//! [artifact]
//! path = "analytics.json"
//! model_id = 1
//!
//! [proposal]
//! chaincode_id = "basic"
//! function = "ReadAsset"
//! args = ["asset1"]
//!
//! [[peers]]
//! name = "peer0.org1.example.com"
//! organization = "Org1MSP"
//! endpoint = "http://localhost:7051"
//! ```

use confirm_application::{EndorsingPeer, SchedulerParams, TransportFailurePolicy};
use confirm_domain::{BudgetLimits, Organization, ProposalResponse, TransactionProposal};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("max_total_messages cannot be 0")]
    InvalidMessageLimit,

    #[error("request_timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("peer name cannot be empty")]
    EmptyPeerName,

    #[error("peer {0} has no organization")]
    MissingOrganization(String),
}

/// Raw scheduler configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSchedulerConfig {
    /// Sends to one organization before its backoff vectors can be pruned
    pub max_requests_per_organization: u32,
    /// Global message budget for a run
    pub max_total_messages: u32,
    /// What a failed proposal send means for the run
    pub on_transport_error: TransportFailurePolicy,
    /// Per-request timeout for network channels
    pub request_timeout_seconds: Option<u64>,
}

impl Default for FileSchedulerConfig {
    fn default() -> Self {
        let limits = BudgetLimits::default();
        Self {
            max_requests_per_organization: limits.max_requests_per_organization,
            max_total_messages: limits.max_total_messages,
            on_transport_error: TransportFailurePolicy::default(),
            request_timeout_seconds: None,
        }
    }
}

impl FileSchedulerConfig {
    pub fn to_params(&self) -> SchedulerParams {
        SchedulerParams::default()
            .with_max_requests_per_organization(self.max_requests_per_organization)
            .with_max_total_messages(self.max_total_messages)
            .with_transport_failure_policy(self.on_transport_error)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}

/// Raw artifact configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileArtifactConfig {
    /// Path to the model checker's JSON output
    pub path: Option<String>,
    /// Model id to replay
    pub model_id: Option<u32>,
    /// Path to a JSON file holding the reference response
    pub reference: Option<String>,
}

/// Raw peer configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePeerConfig {
    /// Peer name
    pub name: String,
    /// Organization the peer endorses for
    pub organization: String,
    /// HTTP endpoint of the peer
    pub endpoint: Option<String>,
    /// Scripted responses used in simulation mode
    pub responses: Vec<ProposalResponse>,
}

impl FilePeerConfig {
    pub fn to_peer(&self) -> EndorsingPeer {
        let peer = EndorsingPeer::new(&self.name, Organization::new(&self.organization));
        match &self.endpoint {
            Some(endpoint) => peer.with_endpoint(endpoint),
            None => peer,
        }
    }
}

/// Output format for confirmation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutputFormat {
    /// One-line verdict with counters
    #[default]
    Summary,
    /// Verdict plus every accepted response
    Full,
    /// JSON output
    Json,
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub format: Option<FileOutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Path of the JSONL event log
    pub event_log: Option<String>,
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub scheduler: FileSchedulerConfig,
    pub artifact: FileArtifactConfig,
    pub proposal: TransactionProposal,
    pub peers: Vec<FilePeerConfig>,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.scheduler.max_total_messages == 0 {
            return Err(ConfigValidationError::InvalidMessageLimit);
        }

        if self.scheduler.request_timeout_seconds == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        for peer in &self.peers {
            if peer.name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyPeerName);
            }
            if peer.organization.trim().is_empty() {
                return Err(ConfigValidationError::MissingOrganization(
                    peer.name.clone(),
                ));
            }
        }

        Ok(())
    }

    /// Peers as application-level endorsing peers
    pub fn endorsing_peers(&self) -> Vec<EndorsingPeer> {
        self.peers.iter().map(FilePeerConfig::to_peer).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.scheduler.max_requests_per_organization, 10);
        assert_eq!(config.scheduler.max_total_messages, 30);
        assert_eq!(
            config.scheduler.on_transport_error,
            TransportFailurePolicy::Abort
        );
        assert!(config.peers.is_empty());
        assert!(config.output.color);
        assert!(config.logging.event_log.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
[scheduler]
max_requests_per_organization = 4
max_total_messages = 12
on_transport_error = "treat_as_reject"
request_timeout_seconds = 5

[artifact]
path = "analytics.json"
model_id = 3

[proposal]
chaincode_id = "basic"
function = "ReadAsset"
args = ["asset1"]

[[peers]]
name = "peer0.org1.example.com"
organization = "Org1MSP"
endpoint = "http://localhost:7051"

[[peers]]
name = "peer0.org2.example.com"
organization = "Org2MSP"
responses = [{ status = 200, payload = "asset1:blue" }]

[output]
format = "json"
color = false

[logging]
event_log = "run.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.scheduler.max_total_messages, 12);
        assert_eq!(
            config.scheduler.on_transport_error,
            TransportFailurePolicy::TreatAsReject
        );
        assert_eq!(config.scheduler.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.artifact.model_id, Some(3));
        assert_eq!(config.proposal.args, vec!["asset1".to_string()]);
        assert_eq!(config.peers.len(), 2);
        assert_eq!(config.peers[1].responses[0].payload, "asset1:blue");
        assert_eq!(config.output.format, Some(FileOutputFormat::Json));
        assert_eq!(config.logging.event_log.as_deref(), Some("run.jsonl"));
        assert!(config.validate().is_ok());

        let params = config.scheduler.to_params();
        assert_eq!(params.limits.max_requests_per_organization, 4);

        let peers = config.endorsing_peers();
        assert_eq!(peers[0].endpoint.as_deref(), Some("http://localhost:7051"));
        assert_eq!(peers[1].organization, Organization::from("Org2MSP"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: FileConfig = toml::from_str("[scheduler]\nmax_total_messages = 8\n").unwrap();
        assert_eq!(config.scheduler.max_total_messages, 8);
        assert_eq!(config.scheduler.max_requests_per_organization, 10);
    }

    #[test]
    fn test_validate_zero_message_limit() {
        let mut config = FileConfig::default();
        config.scheduler.max_total_messages = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidMessageLimit)
        );
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FileConfig::default();
        config.scheduler.request_timeout_seconds = Some(0);
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_peer_fields() {
        let mut config = FileConfig::default();
        config.peers.push(FilePeerConfig {
            name: " ".to_string(),
            organization: "Org1MSP".to_string(),
            ..Default::default()
        });
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyPeerName));

        config.peers[0].name = "peer0".to_string();
        config.peers[0].organization.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::MissingOrganization("peer0".to_string()))
        );
    }
}
