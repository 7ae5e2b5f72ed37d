//! Progress reporting for confirmation runs

use colored::Colorize;
use confirm_application::ConfirmationProgress;
use confirm_domain::{
    AutomatonModel, BudgetLimits, ConsensusResult, PendingStep, StepDecision, StepReport,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with a bar sized to the message budget
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn endorsement_mark(report: &StepReport) -> String {
        if report.endorsement.is_accept() {
            format!("{} {}", "v".green(), report.organization)
        } else {
            format!("{} {}", "x".red(), report.organization)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationProgress for ProgressReporter {
    fn on_run_start(&self, model: &AutomatonModel, limits: &BudgetLimits) {
        let pb = ProgressBar::new(u64::from(limits.max_total_messages));
        pb.set_style(Self::bar_style());
        pb.set_prefix(format!("Model {}", model.id));
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_send(&self, step: &PendingStep) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(format!("asking {}", step.organization));
        }
    }

    fn on_step_complete(&self, report: &StepReport) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_position(u64::from(report.messages_charged));
            let mut status = Self::endorsement_mark(report);
            if report.decision == StepDecision::Restart {
                status.push_str(&format!(" {}", "(restart)".yellow()));
            }
            pb.set_message(status);
        }
    }

    fn on_run_complete(&self, result: &ConsensusResult) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            if result.is_agreement_reached() {
                pb.finish_with_message(format!("{}", "agreement reached".green()));
            } else {
                pb.finish_with_message(format!("{}", "no agreement".red()));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ConfirmationProgress for SimpleProgress {
    fn on_run_start(&self, model: &AutomatonModel, limits: &BudgetLimits) {
        println!(
            "{} {} ({} organizations, budget {})",
            "->".cyan(),
            format!("Model {}", model.id).bold(),
            model.organization_count(),
            limits.max_total_messages
        );
    }

    fn on_send(&self, _step: &PendingStep) {}

    fn on_step_complete(&self, report: &StepReport) {
        println!(
            "  {} [{}] {}",
            ProgressReporter::endorsement_mark(report),
            report.responses,
            report.decision
        );
    }

    fn on_run_complete(&self, _result: &ConsensusResult) {
        println!();
    }
}
