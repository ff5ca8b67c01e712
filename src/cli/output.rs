//! CLI output formatting

use crate::core::{RunState, StepOutcome};
use crate::execution::RunEvent;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a progress bar over the pipeline steps
pub fn create_progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// Format a run event for display
pub fn format_run_event(event: &RunEvent) -> String {
    match event {
        RunEvent::RunStarted { run_id, target } => format!(
            "{} Starting code analysis of {} ({})",
            ROCKET,
            style(target.display()).bold(),
            style(&run_id.to_string()[..8]).dim()
        ),
        RunEvent::StepStarted { number, label } => {
            format!("{} {}", style(format!("{}.", number)).bold(), style(label).bold())
        }
        RunEvent::StepCompleted {
            label, artifacts, ..
        } => {
            if artifacts.is_empty() {
                format!("{} {}", CHECK, style(label).green())
            } else {
                format!(
                    "{} {} → {}",
                    CHECK,
                    style(label).green(),
                    style(format_artifacts(artifacts)).cyan()
                )
            }
        }
        RunEvent::StepSkipped { label, reason, .. } => {
            format!(
                "{} {} skipped: {}",
                WARN,
                style(label).yellow(),
                style(reason).dim()
            )
        }
        RunEvent::StepUnsupported { label, note, .. } => {
            format!(
                "{} {} not automated: {}",
                WARN,
                style(label).yellow(),
                style(note).dim()
            )
        }
        RunEvent::StepFailed { label, error, .. } => {
            format!("{} {}: {}", CROSS, style(label).red(), style(error).dim())
        }
        RunEvent::RunCompleted {
            run_id,
            failed_steps,
        } => {
            let status = if *failed_steps == 0 {
                format!("{}", style("all steps clean").green())
            } else {
                format!("{}", style(format!("{} step(s) warned", failed_steps)).yellow())
            };
            format!(
                "{} Code analysis completed ({}) - {}",
                INFO,
                style(&run_id.to_string()[..8]).dim(),
                status
            )
        }
    }
}

/// Format the final summary banner
pub fn format_summary(state: &RunState) -> String {
    format!(
        "{} Code analysis completed: {} succeeded, {} skipped, {} not automated, {} failed",
        CHECK,
        style(state.completed_steps()).green(),
        style(state.skipped_steps()).yellow(),
        style(state.unsupported_steps()).dim(),
        style(state.failed_steps()).red()
    )
}

/// Format a step outcome for display
pub fn format_outcome(outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Completed { .. } => style("COMPLETED").green().to_string(),
        StepOutcome::Skipped { .. } => style("SKIPPED").dim().to_string(),
        StepOutcome::Unsupported { .. } => style("UNSUPPORTED").yellow().to_string(),
        StepOutcome::Failed { .. } => style("FAILED").red().to_string(),
    }
}

/// Format the per-step recap printed under detailed verbosity
///
/// One outcome line per step, followed by the full artifact list.
pub fn format_step_report(state: &RunState) -> String {
    let mut lines: Vec<String> = state
        .records
        .iter()
        .map(|record| {
            format!(
                "  {:>2}. {:<11} {}",
                record.number,
                format_outcome(&record.outcome),
                record.label
            )
        })
        .collect();

    let artifacts: Vec<String> = state
        .artifacts()
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    if !artifacts.is_empty() {
        lines.push(format!("{} Reports written: {}", INFO, artifacts.join(", ")));
    }

    lines.join("\n")
}

fn format_artifacts(artifacts: &[PathBuf]) -> String {
    artifacts
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_skipped_event_mentions_reason() {
        let event = RunEvent::StepSkipped {
            number: 8,
            label: "Code Coverage Analysis",
            reason: "no tests directory found".to_string(),
        };
        let line = console::strip_ansi_codes(&format_run_event(&event)).to_string();
        assert!(line.contains("Code Coverage Analysis"));
        assert!(line.contains("no tests directory found"));
    }

    #[test]
    fn test_format_completed_event_lists_artifacts() {
        let event = RunEvent::StepCompleted {
            number: 5,
            label: "Static Code Analysis (Linter)",
            artifacts: vec![PathBuf::from("/repo/lint_report.txt")],
        };
        let line = console::strip_ansi_codes(&format_run_event(&event)).to_string();
        assert!(line.contains("lint_report.txt"));
    }

    #[test]
    fn test_step_report_lists_outcomes_and_artifacts() {
        use crate::core::StepRecord;

        let mut state = RunState::new(std::path::Path::new("/repo"));
        state.record(StepRecord {
            number: 5,
            label: "Static Code Analysis (Linter)".to_string(),
            outcome: StepOutcome::Completed {
                artifacts: vec![PathBuf::from("/repo/lint_report.txt")],
            },
        });
        state.record(StepRecord {
            number: 8,
            label: "Code Coverage Analysis".to_string(),
            outcome: StepOutcome::Skipped {
                reason: "no tests directory found".to_string(),
            },
        });

        let report = console::strip_ansi_codes(&format_step_report(&state)).to_string();
        assert!(report.contains("COMPLETED"));
        assert!(report.contains("SKIPPED"));
        assert!(report.contains("Reports written: /repo/lint_report.txt"));
    }

    #[test]
    fn test_format_outcome_labels() {
        let outcome = StepOutcome::Failed {
            error: "boom".to_string(),
        };
        let label = console::strip_ansi_codes(&format_outcome(&outcome)).to_string();
        assert_eq!(label, "FAILED");
    }
}
