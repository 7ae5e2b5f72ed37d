//! Retry budget - request counters and their caps

use crate::core::organization::Organization;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Caps enforced during a single confirmation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetLimits {
    /// Sends to one organization before its backoff vectors become prunable
    pub max_requests_per_organization: u32,
    /// Charged messages after which the run stops
    pub max_total_messages: u32,
}

impl Default for BudgetLimits {
    fn default() -> Self {
        Self {
            max_requests_per_organization: 10,
            max_total_messages: 30,
        }
    }
}

impl BudgetLimits {
    pub fn new(max_requests_per_organization: u32, max_total_messages: u32) -> Self {
        Self {
            max_requests_per_organization,
            max_total_messages,
        }
    }

    pub fn with_max_requests_per_organization(mut self, max: u32) -> Self {
        self.max_requests_per_organization = max;
        self
    }

    pub fn with_max_total_messages(mut self, max: u32) -> Self {
        self.max_total_messages = max;
        self
    }
}

/// Per-organization request counts plus the global message counter.
///
/// Counters only grow; a fresh budget is created for every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryBudget {
    per_organization: HashMap<Organization, u32>,
    total: u32,
}

impl RetryBudget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more request to `organization`, returning the new count
    pub fn increment(&mut self, organization: &Organization) -> u32 {
        let count = self
            .per_organization
            .entry(organization.clone())
            .or_insert(0);
        *count += 1;
        *count
    }

    /// Requests sent to `organization` so far
    pub fn count(&self, organization: &Organization) -> u32 {
        self.per_organization
            .get(organization)
            .copied()
            .unwrap_or(0)
    }

    /// Charge one global message, returning the new total
    pub fn increment_global(&mut self) -> u32 {
        self.total += 1;
        self.total
    }

    /// Global messages charged so far
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Per-organization counts, sorted by organization name
    pub fn per_organization(&self) -> Vec<(Organization, u32)> {
        let mut counts: Vec<_> = self
            .per_organization
            .iter()
            .map(|(org, count)| (org.clone(), *count))
            .collect();
        counts.sort();
        counts
    }
}
