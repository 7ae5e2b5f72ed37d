//! Automaton model - one selected model-check result
//!
//! An [`AutomatonModel`] pairs the organization ordering with the two vector
//! sets that drive a confirmation run:
//!
//! - **consensus vectors** (the specification): reaching one means agreement
//! - **backoff vectors** (backward transitions): reaching one means restart

use super::backoff::BackoffTransitions;
use super::vector::ResponseVector;
use crate::core::error::DomainError;
use crate::core::organization::Organization;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A precomputed automaton selected by model id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomatonModel {
    /// Model id within the artifact
    pub id: u32,
    /// Polling order; also defines vector indexing
    pub organizations: Vec<Organization>,
    /// Vectors proving that consensus is reached
    pub consensus_vectors: HashSet<ResponseVector>,
    /// Vectors that force a restart of the polling sequence
    pub backoff_vectors: HashSet<ResponseVector>,
    /// Probability of reaching consensus computed by the model checker
    pub probability: f64,
    /// Expected number of messages computed by the model checker
    pub expected_messages: f64,
    /// When the model check was produced (seconds since epoch)
    pub epoch_timestamp: i64,
}

impl AutomatonModel {
    /// Create a model with no metadata
    pub fn new(
        id: u32,
        organizations: Vec<Organization>,
        consensus_vectors: HashSet<ResponseVector>,
        backoff_vectors: HashSet<ResponseVector>,
    ) -> Self {
        Self {
            id,
            organizations,
            consensus_vectors,
            backoff_vectors,
            probability: 0.0,
            expected_messages: 0.0,
            epoch_timestamp: 0,
        }
    }

    pub fn organization_count(&self) -> usize {
        self.organizations.len()
    }

    /// Check whether `responses` is one of the consensus vectors
    pub fn is_consensus(&self, responses: &ResponseVector) -> bool {
        self.consensus_vectors.contains(responses)
    }

    /// Private working copy of the backoff set for a single run.
    ///
    /// Pruning during the run mutates only the copy.
    pub fn backoff_working_set(&self) -> BackoffTransitions {
        BackoffTransitions::new(self.backoff_vectors.clone())
    }

    /// Validate the model before any network activity.
    ///
    /// Rejects an empty or duplicated organization list, vectors whose length
    /// differs from the organization count, and vectors present in both sets.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.organizations.is_empty() {
            return Err(DomainError::InvalidModel(format!(
                "model {} has no organizations",
                self.id
            )));
        }

        let mut seen = HashSet::new();
        for organization in &self.organizations {
            if !seen.insert(organization) {
                return Err(DomainError::InvalidModel(format!(
                    "organization {} appears more than once in model {}",
                    organization, self.id
                )));
            }
        }

        let expected = self.organizations.len();
        for vector in self.consensus_vectors.iter().chain(&self.backoff_vectors) {
            if vector.len() != expected {
                return Err(DomainError::InvalidModel(format!(
                    "vector {} has length {}, expected {}",
                    vector,
                    vector.len(),
                    expected
                )));
            }
        }

        if let Some(overlap) = self.consensus_vectors.intersection(&self.backoff_vectors).next() {
            return Err(DomainError::InvalidModel(format!(
                "vector {} is both a consensus and a backoff vector in model {}",
                overlap, self.id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(values: &[i64]) -> ResponseVector {
        ResponseVector::try_from(values).unwrap()
    }

    fn orgs(names: &[&str]) -> Vec<Organization> {
        names.iter().map(|n| Organization::from(*n)).collect()
    }

    fn three_org_model() -> AutomatonModel {
        AutomatonModel::new(
            1,
            orgs(&["A", "B", "C"]),
            HashSet::from([vector(&[1, 1, 1])]),
            HashSet::from([vector(&[0, -1, -1])]),
        )
    }

    #[test]
    fn test_valid_model() {
        assert!(three_org_model().validate().is_ok());
    }

    #[test]
    fn test_empty_organizations_rejected() {
        let model = AutomatonModel::new(3, vec![], HashSet::new(), HashSet::new());
        assert!(matches!(
            model.validate(),
            Err(DomainError::InvalidModel(msg)) if msg.contains("no organizations")
        ));
    }

    #[test]
    fn test_duplicate_organization_rejected() {
        let model = AutomatonModel::new(1, orgs(&["A", "A"]), HashSet::new(), HashSet::new());
        assert!(matches!(model.validate(), Err(DomainError::InvalidModel(_))));
    }

    #[test]
    fn test_vector_length_mismatch_rejected() {
        let mut model = three_org_model();
        model.backoff_vectors.insert(vector(&[0, -1]));
        assert_eq!(
            model.validate(),
            Err(DomainError::InvalidModel(
                "vector [0,-1] has length 2, expected 3".to_string()
            ))
        );
    }

    #[test]
    fn test_overlapping_sets_rejected() {
        let mut model = three_org_model();
        model.backoff_vectors.insert(vector(&[1, 1, 1]));
        assert!(matches!(
            model.validate(),
            Err(DomainError::InvalidModel(msg)) if msg.contains("[1,1,1]")
        ));
    }

    #[test]
    fn test_working_set_is_independent_copy() {
        let model = three_org_model();
        let mut working = model.backoff_working_set();
        assert!(working.remove(&vector(&[0, -1, -1])));

        assert!(working.is_empty());
        assert_eq!(model.backoff_vectors.len(), 1);
    }
}
