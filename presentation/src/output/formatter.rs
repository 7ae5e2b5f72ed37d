//! Output formatter trait

use confirm_domain::ConsensusResult;

/// Trait for formatting confirmation results
pub trait OutputFormatter {
    /// Format the complete result
    fn format(&self, result: &ConsensusResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &ConsensusResult) -> String;

    /// Format the verdict only (concise output)
    fn format_summary(&self, result: &ConsensusResult) -> String;
}
