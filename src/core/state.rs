//! Run state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Overall run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Run has not started
    Pending,
    /// Run is iterating the pipeline
    Running,
    /// All steps were attempted
    Completed,
}

/// Outcome of a single step
///
/// Failures are terminal for the step only, never for the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Step ran its tool(s) and produced the listed artifacts
    Completed { artifacts: Vec<PathBuf> },
    /// A precondition was unmet (no tests directory, no entry point, ...)
    Skipped { reason: String },
    /// Step is declared out of scope by design
    Unsupported { note: String },
    /// Tool invocation failed; the run continued
    Failed { error: String },
}

/// Record of one attempted step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// 1-based pipeline position
    pub number: usize,

    /// Step label
    pub label: String,

    /// How the step ended
    pub outcome: StepOutcome,
}

/// In-memory record of one analysis run
///
/// Never persisted; it exists to drive the final banner and the `--json`
/// summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Unique run ID
    pub run_id: Uuid,

    /// The analyzed source tree
    pub target: PathBuf,

    /// Current run status
    pub status: RunStatus,

    /// When the run started
    pub started_at: Option<DateTime<Utc>>,

    /// When the run finished
    pub completed_at: Option<DateTime<Utc>>,

    /// One record per attempted step, in pipeline order
    pub records: Vec<StepRecord>,
}

impl RunState {
    /// Create a new run state for a target tree
    pub fn new(target: &Path) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            target: target.to_path_buf(),
            status: RunStatus::Pending,
            started_at: None,
            completed_at: None,
            records: Vec::new(),
        }
    }

    /// Mark the run as started
    pub fn start(&mut self) {
        self.status = RunStatus::Running;
        self.started_at = Some(Utc::now());
    }

    /// Mark the run as finished
    pub fn finish(&mut self) {
        self.status = RunStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    /// Append a step record
    pub fn record(&mut self, record: StepRecord) {
        self.records.push(record);
    }

    /// Number of steps that produced artifacts
    pub fn completed_steps(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, StepOutcome::Completed { .. }))
            .count()
    }

    /// Number of steps skipped on an unmet precondition
    pub fn skipped_steps(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, StepOutcome::Skipped { .. }))
            .count()
    }

    /// Number of steps declared unsupported
    pub fn unsupported_steps(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, StepOutcome::Unsupported { .. }))
            .count()
    }

    /// Number of steps that failed
    pub fn failed_steps(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, StepOutcome::Failed { .. }))
            .count()
    }

    /// All artifacts produced by completed steps, in pipeline order
    pub fn artifacts(&self) -> Vec<&PathBuf> {
        self.records
            .iter()
            .filter_map(|r| match &r.outcome {
                StepOutcome::Completed { artifacts } => Some(artifacts.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(number: usize, outcome: StepOutcome) -> StepRecord {
        StepRecord {
            number,
            label: format!("step {}", number),
            outcome,
        }
    }

    #[test]
    fn test_counts() {
        let mut state = RunState::new(Path::new("/repo"));
        state.start();
        state.record(record(
            1,
            StepOutcome::Completed {
                artifacts: vec![PathBuf::from("/repo/a.txt")],
            },
        ));
        state.record(record(
            2,
            StepOutcome::Unsupported {
                note: "out of scope".to_string(),
            },
        ));
        state.record(record(
            3,
            StepOutcome::Skipped {
                reason: "no tests directory".to_string(),
            },
        ));
        state.record(record(
            4,
            StepOutcome::Failed {
                error: "tool exploded".to_string(),
            },
        ));
        state.finish();

        assert_eq!(state.completed_steps(), 1);
        assert_eq!(state.unsupported_steps(), 1);
        assert_eq!(state.skipped_steps(), 1);
        assert_eq!(state.failed_steps(), 1);
        assert_eq!(state.status, RunStatus::Completed);
        assert!(state.started_at.is_some());
        assert!(state.completed_at.is_some());
    }

    #[test]
    fn test_artifacts_in_order() {
        let mut state = RunState::new(Path::new("/repo"));
        state.record(record(
            1,
            StepOutcome::Completed {
                artifacts: vec![PathBuf::from("a"), PathBuf::from("b")],
            },
        ));
        state.record(record(
            2,
            StepOutcome::Completed {
                artifacts: vec![PathBuf::from("c")],
            },
        ));

        let artifacts: Vec<_> = state.artifacts().iter().map(|p| p.display().to_string()).collect();
        assert_eq!(artifacts, vec!["a", "b", "c"]);
    }
}
