//! Scheduler parameters — confirmation run control.
//!
//! [`SchedulerParams`] groups the static parameters that control a
//! [`RunConfirmationUseCase`](crate::use_cases::run_confirmation::RunConfirmationUseCase):
//! the retry budget caps and what to do when a proposal send fails.

use confirm_domain::BudgetLimits;
use serde::{Deserialize, Serialize};

/// What a failed proposal send means for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportFailurePolicy {
    /// Abort the run and surface the error with the partial result
    #[default]
    Abort,
    /// Count the failed send as a reject and keep walking
    TreatAsReject,
}

impl TransportFailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportFailurePolicy::Abort => "abort",
            TransportFailurePolicy::TreatAsReject => "treat_as_reject",
        }
    }
}

impl std::fmt::Display for TransportFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransportFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(TransportFailurePolicy::Abort),
            "reject" | "treat_as_reject" | "treat-as-reject" => {
                Ok(TransportFailurePolicy::TreatAsReject)
            }
            _ => Err(format!(
                "Unknown transport failure policy: {}. Valid: abort, reject",
                s
            )),
        }
    }
}

/// Confirmation run control parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerParams {
    /// Retry budget caps
    pub limits: BudgetLimits,
    /// Handling of failed proposal sends
    pub on_transport_error: TransportFailurePolicy,
}

impl SchedulerParams {
    // ==================== Builder Methods ====================

    pub fn with_max_requests_per_organization(mut self, max: u32) -> Self {
        self.limits.max_requests_per_organization = max;
        self
    }

    pub fn with_max_total_messages(mut self, max: u32) -> Self {
        self.limits.max_total_messages = max;
        self
    }

    pub fn with_transport_failure_policy(mut self, policy: TransportFailurePolicy) -> Self {
        self.on_transport_error = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = SchedulerParams::default();
        assert_eq!(params.limits.max_requests_per_organization, 10);
        assert_eq!(params.limits.max_total_messages, 30);
        assert_eq!(params.on_transport_error, TransportFailurePolicy::Abort);
    }

    #[test]
    fn test_builder() {
        let params = SchedulerParams::default()
            .with_max_requests_per_organization(3)
            .with_max_total_messages(12)
            .with_transport_failure_policy(TransportFailurePolicy::TreatAsReject);

        assert_eq!(params.limits.max_requests_per_organization, 3);
        assert_eq!(params.limits.max_total_messages, 12);
        assert_eq!(
            params.on_transport_error,
            TransportFailurePolicy::TreatAsReject
        );
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!(
            "abort".parse::<TransportFailurePolicy>().ok(),
            Some(TransportFailurePolicy::Abort)
        );
        assert_eq!(
            "Reject".parse::<TransportFailurePolicy>().ok(),
            Some(TransportFailurePolicy::TreatAsReject)
        );
        assert!("retry".parse::<TransportFailurePolicy>().is_err());
    }
}
