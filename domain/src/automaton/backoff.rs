//! Per-run working copy of the backward transitions

use super::vector::ResponseVector;
use std::collections::HashSet;

/// Backoff vectors owned by a single confirmation run.
///
/// Created from [`AutomatonModel::backoff_working_set`](super::AutomatonModel::backoff_working_set);
/// removals are visible only to the run that made them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackoffTransitions {
    vectors: HashSet<ResponseVector>,
    pruned: u32,
}

impl BackoffTransitions {
    pub fn new(vectors: HashSet<ResponseVector>) -> Self {
        Self { vectors, pruned: 0 }
    }

    pub fn matches(&self, responses: &ResponseVector) -> bool {
        self.vectors.contains(responses)
    }

    /// Permanently drop a vector for the rest of the run.
    ///
    /// Returns `true` if the vector was present.
    pub fn remove(&mut self, responses: &ResponseVector) -> bool {
        let removed = self.vectors.remove(responses);
        if removed {
            self.pruned += 1;
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Number of vectors removed so far
    pub fn pruned_count(&self) -> u32 {
        self.pruned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_counts_only_present_vectors() {
        let target = ResponseVector::try_from([0_i64, -1].as_slice()).unwrap();
        let mut backoff = BackoffTransitions::new(HashSet::from([target.clone()]));

        assert!(backoff.matches(&target));
        assert!(backoff.remove(&target));
        assert!(!backoff.remove(&target));

        assert!(!backoff.matches(&target));
        assert_eq!(backoff.pruned_count(), 1);
    }
}
