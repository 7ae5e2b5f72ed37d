//! Organization identifiers

use serde::{Deserialize, Serialize};

/// A logical endorsing party, addressed by name.
///
/// During a confirmation run each organization maps to exactly one
/// contactable peer, resolved by the endorsement channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Organization(String);

impl Organization {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Organization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Organization {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Organization {
    fn from(name: String) -> Self {
        Self(name)
    }
}
