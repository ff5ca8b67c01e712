//! Step runner - drives the fixed pipeline with per-step failure isolation

use crate::core::{RunState, StepDescriptor, StepKind, StepOutcome, StepRecord, PIPELINE};
use crate::core::AnalyzerConfig;
use crate::execution::resolver::EntryPointResolver;
use crate::execution::steps::{self, StepError};
use crate::tools::ToolInvoker;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

/// Events that occur during a run
#[derive(Debug, Clone)]
pub enum RunEvent {
    RunStarted {
        run_id: Uuid,
        target: PathBuf,
    },
    StepStarted {
        number: usize,
        label: &'static str,
    },
    StepCompleted {
        number: usize,
        label: &'static str,
        artifacts: Vec<PathBuf>,
    },
    StepSkipped {
        number: usize,
        label: &'static str,
        reason: String,
    },
    StepUnsupported {
        number: usize,
        label: &'static str,
        note: String,
    },
    StepFailed {
        number: usize,
        label: &'static str,
        error: String,
    },
    RunCompleted {
        run_id: Uuid,
        failed_steps: usize,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(RunEvent) + Send + Sync>;

/// Drives the fourteen analysis steps in fixed order
///
/// Every step is attempted exactly once per run; a step failure is recorded
/// and reported, never propagated to the steps after it.
pub struct StepRunner<R> {
    invoker: Arc<dyn ToolInvoker>,
    resolver: R,
    config: AnalyzerConfig,
    event_handlers: Mutex<Vec<EventHandler>>,
}

impl<R: EntryPointResolver> StepRunner<R> {
    pub fn new(invoker: Arc<dyn ToolInvoker>, resolver: R, config: AnalyzerConfig) -> Self {
        Self {
            invoker,
            resolver,
            config,
            event_handlers: Mutex::new(Vec::new()),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&self, handler: F)
    where
        F: Fn(RunEvent) + Send + Sync + 'static,
    {
        if let Ok(mut handlers) = self.event_handlers.lock() {
            handlers.push(Arc::new(handler));
        }
    }

    /// Emit an event to all handlers
    fn emit(&self, event: RunEvent) {
        if let Ok(handlers) = self.event_handlers.lock() {
            for handler in handlers.iter() {
                handler(event.clone());
            }
        }
    }

    /// Run the whole pipeline against a target tree
    ///
    /// Always attempts all fourteen steps; the returned state carries one
    /// record per step.
    pub async fn run(&self, target: &Path) -> RunState {
        let mut state = RunState::new(target);
        state.start();

        info!(
            "Starting analysis run {} against {}",
            state.run_id,
            target.display()
        );
        self.emit(RunEvent::RunStarted {
            run_id: state.run_id,
            target: target.to_path_buf(),
        });

        for step in &PIPELINE {
            self.emit(RunEvent::StepStarted {
                number: step.number,
                label: step.label,
            });
            info!("Step {}: {}", step.number, step.label);

            let outcome = match self.run_step(step, target).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Step {} ({}) failed: {}", step.number, step.label, e);
                    StepOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };

            match &outcome {
                StepOutcome::Completed { artifacts } => self.emit(RunEvent::StepCompleted {
                    number: step.number,
                    label: step.label,
                    artifacts: artifacts.clone(),
                }),
                StepOutcome::Skipped { reason } => self.emit(RunEvent::StepSkipped {
                    number: step.number,
                    label: step.label,
                    reason: reason.clone(),
                }),
                StepOutcome::Unsupported { note } => self.emit(RunEvent::StepUnsupported {
                    number: step.number,
                    label: step.label,
                    note: note.clone(),
                }),
                StepOutcome::Failed { error } => self.emit(RunEvent::StepFailed {
                    number: step.number,
                    label: step.label,
                    error: error.clone(),
                }),
            }

            state.record(StepRecord {
                number: step.number,
                label: step.label.to_string(),
                outcome,
            });
        }

        state.finish();
        info!(
            "Analysis run {} finished: {} completed, {} skipped, {} failed",
            state.run_id,
            state.completed_steps(),
            state.skipped_steps(),
            state.failed_steps()
        );
        self.emit(RunEvent::RunCompleted {
            run_id: state.run_id,
            failed_steps: state.failed_steps(),
        });

        state
    }

    /// Dispatch a single step
    ///
    /// Unsupported steps report without invoking anything, and the profiling
    /// steps go through entry-point resolution first; only the remaining
    /// kinds reach the tool invocations below.
    async fn run_step(
        &self,
        step: &StepDescriptor,
        target: &Path,
    ) -> Result<StepOutcome, StepError> {
        if let Some(note) = step.kind.unsupported_note() {
            return Ok(StepOutcome::Unsupported {
                note: note.to_string(),
            });
        }

        if step.kind.needs_entry_point() {
            let entry = match self.entry_point_for(step, target) {
                EntryPoint::Skip(reason) => return Ok(StepOutcome::Skipped { reason }),
                EntryPoint::Script(entry) => entry,
            };
            let invoker = self.invoker.as_ref();
            return match step.kind {
                StepKind::MemoryProfile => {
                    steps::memory_profile(&self.config, target, &entry, invoker).await
                }
                StepKind::ExecutionProfile => {
                    steps::execution_profile(&self.config, target, &entry, invoker).await
                }
                _ => steps::runtime_type_check(&self.config, target, &entry, invoker).await,
            };
        }

        let invoker = self.invoker.as_ref();
        match step.kind {
            StepKind::AstDump => steps::ast_dump(&self.config, target, invoker).await,
            StepKind::CallGraph => steps::call_graph(&self.config, target, invoker).await,
            StepKind::DataFlow => steps::data_flow(&self.config, target, invoker).await,
            StepKind::Lint => steps::lint(&self.config, target, invoker).await,
            StepKind::CyclomaticComplexity => {
                steps::cyclomatic_complexity(&self.config, target, invoker).await
            }
            StepKind::DependencyGraph => {
                steps::dependency_graph(&self.config, target, invoker).await
            }
            StepKind::Coverage => steps::coverage(&self.config, target, invoker).await,
            StepKind::ClassDiagram => steps::class_diagram(&self.config, target, invoker).await,
            StepKind::SemanticAnalysis => {
                steps::semantic_analysis(&self.config, target, invoker).await
            }
            // Handled by the guards above; listed so the match stays total
            StepKind::ControlFlowGraph
            | StepKind::TestGeneration
            | StepKind::MemoryProfile
            | StepKind::ExecutionProfile
            | StepKind::RuntimeTypeCheck => Ok(StepOutcome::Skipped {
                reason: format!("step {} has no direct tool invocation", step.number),
            }),
        }
    }

    /// Query the resolver for an entry point and validate it against the tree
    ///
    /// An empty answer skips without invoking anything; a path that does not
    /// exist under the target skips with an explicit message.
    fn entry_point_for(&self, step: &StepDescriptor, target: &Path) -> EntryPoint {
        match self.resolver.resolve(step.label) {
            None => EntryPoint::Skip("no entry-point script supplied".to_string()),
            Some(entry) => {
                let script = target.join(&entry);
                if script.exists() {
                    EntryPoint::Script(entry)
                } else {
                    EntryPoint::Skip(format!("entry-point script '{}' does not exist", entry))
                }
            }
        }
    }
}

/// Resolved entry point for one profiling step
enum EntryPoint {
    Skip(String),
    Script(String),
}
