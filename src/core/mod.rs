//! Core domain models for the analysis pipeline
//!
//! This module defines the fixed step sequence, the analyzer configuration,
//! and the per-run state records.

pub mod config;
pub mod state;
pub mod step;

pub use config::*;
pub use state::*;
pub use step::*;
