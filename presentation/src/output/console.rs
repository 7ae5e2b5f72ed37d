//! Console output formatter for confirmation results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use confirm_domain::ConsensusResult;

/// Formats confirmation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete result
    pub fn format(result: &ConsensusResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Endorsement Confirmation"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Verdict:".cyan().bold(),
            Self::verdict(result)
        ));

        output.push_str(&Self::section_header("Accepted Responses"));
        if result.responses.is_empty() {
            output.push_str(&format!("\n{}\n", "(none)".dimmed()));
        }
        for response in &result.responses {
            let peer = if response.peer.is_empty() {
                "<unnamed peer>"
            } else {
                response.peer.as_str()
            };
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ({}) ──", peer, response.status).yellow().bold(),
                Self::indent(&response.payload, "  ")
            ));
        }

        output.push_str(&Self::section_header("Run Statistics"));
        let stats = &result.stats;
        output.push_str(&format!("\n  Messages charged: {}\n", stats.messages_charged));
        output.push_str(&format!("  Proposals sent:   {}\n", stats.proposals_sent));
        output.push_str(&format!("  Restarts:         {}\n", stats.restarts));
        output.push_str(&format!("  Pruned backoffs:  {}\n", stats.pruned_backoffs));

        if !result.requests_per_organization.is_empty() {
            output.push_str(&format!("\n{}\n", "Requests per organization:".cyan().bold()));
            for (organization, count) in &result.requests_per_organization {
                output.push_str(&format!("  {:<24} {}\n", organization.name(), count));
            }
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &ConsensusResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the verdict only (concise output)
    pub fn format_summary(result: &ConsensusResult) -> String {
        format!(
            "{} {} accepted, {} messages, {} sent, {} restarts\n",
            Self::verdict(result),
            result.accepted_count(),
            result.stats.messages_charged,
            result.stats.proposals_sent,
            result.stats.restarts
        )
    }

    fn verdict(result: &ConsensusResult) -> String {
        if result.is_agreement_reached() {
            "agreement reached".green().bold().to_string()
        } else {
            "no agreement".red().bold().to_string()
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &ConsensusResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &ConsensusResult) -> String {
        Self::format_json(result)
    }

    fn format_summary(&self, result: &ConsensusResult) -> String {
        Self::format_summary(result)
    }
}
