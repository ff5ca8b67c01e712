//! pyaudit - drives a fixed pipeline of Python analysis tools against a source tree

pub mod cli;
pub mod core;
pub mod execution;
pub mod tools;

// Re-export commonly used types
pub use crate::core::{AnalyzerConfig, Verbosity};
pub use crate::core::{RunState, RunStatus, StepOutcome, StepRecord};
pub use crate::core::{StepDescriptor, StepKind, PIPELINE};
pub use crate::execution::{EntryPointResolver, FixedEntryPoint, PromptResolver};
pub use crate::execution::{RunEvent, StepError, StepRunner};
pub use crate::tools::{RequirementChecker, SubprocessInvoker, REQUIRED_TOOLS};
pub use crate::tools::{ToolError, ToolInvoker, ToolOutput, ToolRequest};
