//! Model-checking artifact records
//!
//! The offline model checker emits one artifact per deployment. It shares a
//! single organization ordering and specification across every model-check
//! result, and each result contributes its own backward transitions:
//!
//! ```json
//! {
//!   "organizations": ["Org1MSP", "Org2MSP"],
//!   "specification": [[1, 1]],
//!   "modelCheckResultList": [
//!     {
//!       "id": 1,
//!       "backwardTransitions": [[0, -1]],
//!       "probability": 0.97,
//!       "expectedMessages": 2.4,
//!       "epochTimestamp": 1700000000
//!     }
//!   ]
//! }
//! ```

use super::model::AutomatonModel;
use super::vector::ResponseVector;
use crate::core::error::DomainError;
use crate::core::organization::Organization;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single model-check result keyed by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCheckResult {
    pub id: u32,
    #[serde(default)]
    pub backward_transitions: HashSet<ResponseVector>,
    #[serde(default)]
    pub probability: f64,
    #[serde(default)]
    pub expected_messages: f64,
    #[serde(default)]
    pub epoch_timestamp: i64,
}

/// The full artifact: shared specification and ordering plus every result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelArtifact {
    #[serde(default)]
    pub model_check_result_list: Vec<ModelCheckResult>,
    #[serde(default)]
    pub specification: HashSet<ResponseVector>,
    #[serde(default)]
    pub organizations: Vec<Organization>,
}

impl ModelArtifact {
    /// Select the automaton for `id`.
    ///
    /// The returned model owns its sets; the artifact is left untouched.
    pub fn select_model(&self, id: u32) -> Result<AutomatonModel, DomainError> {
        let result = self
            .model_check_result_list
            .iter()
            .find(|r| r.id == id)
            .ok_or(DomainError::ModelNotFound(id))?;

        Ok(AutomatonModel {
            id: result.id,
            organizations: self.organizations.clone(),
            consensus_vectors: self.specification.clone(),
            backoff_vectors: result.backward_transitions.clone(),
            probability: result.probability,
            expected_messages: result.expected_messages,
            epoch_timestamp: result.epoch_timestamp,
        })
    }

    /// Ids of every model-check result, in artifact order
    pub fn model_ids(&self) -> Vec<u32> {
        self.model_check_result_list.iter().map(|r| r.id).collect()
    }

    pub fn get(&self, id: u32) -> Option<&ModelCheckResult> {
        self.model_check_result_list.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTIFACT: &str = r#"{
        "organizations": ["A", "B", "C"],
        "specification": [[1, 1, 1], [1, 1, 0]],
        "modelCheckResultList": [
            {
                "id": 1,
                "backwardTransitions": [[0, -1, -1]],
                "probability": 0.9,
                "expectedMessages": 3.5,
                "epochTimestamp": 1700000000
            },
            { "id": 2, "backwardTransitions": [] }
        ]
    }"#;

    #[test]
    fn test_parse_artifact() {
        let artifact: ModelArtifact = serde_json::from_str(ARTIFACT).unwrap();
        assert_eq!(artifact.organizations.len(), 3);
        assert_eq!(artifact.specification.len(), 2);
        assert_eq!(artifact.model_ids(), vec![1, 2]);
    }

    #[test]
    fn test_select_model() {
        let artifact: ModelArtifact = serde_json::from_str(ARTIFACT).unwrap();
        let model = artifact.select_model(1).unwrap();

        assert_eq!(model.id, 1);
        assert_eq!(model.organizations[0], Organization::from("A"));
        assert_eq!(model.consensus_vectors.len(), 2);
        assert_eq!(model.backoff_vectors.len(), 1);
        assert_eq!(model.expected_messages, 3.5);
        assert_eq!(model.epoch_timestamp, 1_700_000_000);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_select_model_defaults_missing_metadata() {
        let artifact: ModelArtifact = serde_json::from_str(ARTIFACT).unwrap();
        let model = artifact.select_model(2).unwrap();

        assert!(model.backoff_vectors.is_empty());
        assert_eq!(model.probability, 0.0);
    }

    #[test]
    fn test_select_missing_model() {
        let artifact: ModelArtifact = serde_json::from_str(ARTIFACT).unwrap();
        assert_eq!(
            artifact.select_model(42),
            Err(DomainError::ModelNotFound(42))
        );
    }

    #[test]
    fn test_invalid_vector_value_fails_parse() {
        let json = r#"{ "organizations": ["A"], "specification": [[7]] }"#;
        assert!(serde_json::from_str::<ModelArtifact>(json).is_err());
    }
}
