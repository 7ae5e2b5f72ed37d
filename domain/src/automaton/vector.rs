//! Response vectors - the automaton's state
//!
//! A [`ResponseVector`] holds one ternary [`Endorsement`] per organization,
//! indexed by the organization's position in the model's original ordering.
//! The model checker encodes these as integer arrays (`-1`, `0`, `1`), so the
//! serde representation matches that encoding exactly.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Outcome recorded for a single organization in the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Endorsement {
    /// Not yet queried this round
    #[default]
    Unknown,
    /// The peer's response did not match
    Reject,
    /// The peer's response matched
    Accept,
}

impl Endorsement {
    /// Integer encoding used by model-checking artifacts
    pub fn as_i64(self) -> i64 {
        match self {
            Endorsement::Unknown => -1,
            Endorsement::Reject => 0,
            Endorsement::Accept => 1,
        }
    }

    pub fn is_accept(self) -> bool {
        matches!(self, Endorsement::Accept)
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, Endorsement::Unknown)
    }

    /// Map a boolean classification outcome onto an endorsement
    pub fn from_accepted(accepted: bool) -> Self {
        if accepted {
            Endorsement::Accept
        } else {
            Endorsement::Reject
        }
    }
}

impl TryFrom<i64> for Endorsement {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Endorsement::Unknown),
            0 => Ok(Endorsement::Reject),
            1 => Ok(Endorsement::Accept),
            other => Err(DomainError::InvalidEndorsement(other)),
        }
    }
}

impl From<Endorsement> for i64 {
    fn from(value: Endorsement) -> Self {
        value.as_i64()
    }
}

impl std::fmt::Display for Endorsement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

/// Fixed-length ternary vector, one slot per organization.
///
/// # Example
///
/// ```
/// use confirm_domain::automaton::{Endorsement, ResponseVector};
///
/// let mut responses = ResponseVector::unknown(3);
/// responses.set(0, Endorsement::Reject);
///
/// assert_eq!(responses.to_string(), "[0,-1,-1]");
/// assert!(!responses.is_exhausted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseVector(Vec<Endorsement>);

impl ResponseVector {
    /// A vector with every slot `Unknown`
    pub fn unknown(len: usize) -> Self {
        Self(vec![Endorsement::Unknown; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Endorsement> {
        self.0.get(index).copied()
    }

    /// Write an outcome into a slot; out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: Endorsement) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = value;
        }
    }

    /// Reset every slot back to `Unknown`
    pub fn clear(&mut self) {
        self.0.fill(Endorsement::Unknown);
    }

    /// Number of slots not yet filled this round
    pub fn unknown_count(&self) -> usize {
        self.0.iter().filter(|e| e.is_unknown()).count()
    }

    /// A vector with no `Unknown` slots has reached the end of the tree
    pub fn is_exhausted(&self) -> bool {
        self.unknown_count() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Endorsement> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Endorsement] {
        &self.0
    }
}

impl From<Vec<Endorsement>> for ResponseVector {
    fn from(values: Vec<Endorsement>) -> Self {
        Self(values)
    }
}

impl TryFrom<&[i64]> for ResponseVector {
    type Error = DomainError;

    fn try_from(values: &[i64]) -> Result<Self, Self::Error> {
        values
            .iter()
            .map(|v| Endorsement::try_from(*v))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl std::fmt::Display for ResponseVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "[{}]", cells.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(values: &[i64]) -> ResponseVector {
        ResponseVector::try_from(values).unwrap()
    }

    #[test]
    fn test_unknown_vector() {
        let responses = ResponseVector::unknown(4);
        assert_eq!(responses.len(), 4);
        assert_eq!(responses.unknown_count(), 4);
        assert!(!responses.is_exhausted());
    }

    #[test]
    fn test_set_and_exhaustion() {
        let mut responses = ResponseVector::unknown(2);
        responses.set(0, Endorsement::Accept);
        assert!(!responses.is_exhausted());

        responses.set(1, Endorsement::Reject);
        assert!(responses.is_exhausted());
        assert_eq!(responses, vector(&[1, 0]));
    }

    #[test]
    fn test_set_out_of_range_is_ignored() {
        let mut responses = ResponseVector::unknown(1);
        responses.set(5, Endorsement::Accept);
        assert_eq!(responses, ResponseVector::unknown(1));
    }

    #[test]
    fn test_clear_resets_all_slots() {
        let mut responses = vector(&[1, 0, 1]);
        responses.clear();
        assert_eq!(responses, ResponseVector::unknown(3));
    }

    #[test]
    fn test_invalid_integer_is_rejected() {
        assert_eq!(
            ResponseVector::try_from([1_i64, 2].as_slice()),
            Err(DomainError::InvalidEndorsement(2))
        );
    }

    #[test]
    fn test_serde_uses_integer_encoding() {
        let responses = vector(&[0, -1, 1]);
        let json = serde_json::to_string(&responses).unwrap();
        assert_eq!(json, "[0,-1,1]");

        let parsed: ResponseVector = serde_json::from_str("[1,1,-1]").unwrap();
        assert_eq!(parsed, vector(&[1, 1, -1]));

        assert!(serde_json::from_str::<ResponseVector>("[3]").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(vector(&[1, 0, -1]).to_string(), "[1,0,-1]");
        assert_eq!(Endorsement::Accept.to_string(), "1");
    }
}
