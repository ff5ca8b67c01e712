//! Pipeline execution

pub mod resolver;
pub mod runner;
pub mod steps;

pub use resolver::{EntryPointResolver, FixedEntryPoint, PromptResolver};
pub use runner::{EventHandler, RunEvent, StepRunner};
pub use steps::StepError;
