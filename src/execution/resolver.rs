//! Entry-point resolution for the profiling steps
//!
//! Three steps run the target program itself and need the user to name an
//! executable entry-point script. The runner queries an injected resolver
//! once per step; `None` (or an empty answer) skips the step.

use console::{style, Term};
use tracing::debug;

/// Supplies an entry-point script path, relative to the target tree
pub trait EntryPointResolver: Send + Sync {
    /// Resolve an entry point for the named step, or `None` to skip it
    fn resolve(&self, step_label: &str) -> Option<String>;
}

impl<R: EntryPointResolver + ?Sized> EntryPointResolver for Box<R> {
    fn resolve(&self, step_label: &str) -> Option<String> {
        (**self).resolve(step_label)
    }
}

/// Resolver backed by a live terminal prompt
#[derive(Debug, Clone, Default)]
pub struct PromptResolver;

impl PromptResolver {
    pub fn new() -> Self {
        Self
    }
}

impl EntryPointResolver for PromptResolver {
    fn resolve(&self, step_label: &str) -> Option<String> {
        if !console::user_attended() {
            debug!("No terminal attached; skipping prompt for {}", step_label);
            return None;
        }

        let term = Term::stdout();
        let prompt = format!(
            "{} needs an entry-point script (relative to the target tree, empty to skip): ",
            style(step_label).bold()
        );
        if term.write_str(&prompt).is_err() {
            return None;
        }

        match term.read_line() {
            Ok(line) => normalize(&line),
            Err(_) => None,
        }
    }
}

/// Resolver backed by a command-line flag; `None` never supplies an entry point
#[derive(Debug, Clone, Default)]
pub struct FixedEntryPoint {
    entry: Option<String>,
}

impl FixedEntryPoint {
    /// Always answer with the given entry point (if any)
    pub fn new(entry: Option<String>) -> Self {
        Self { entry }
    }

    /// Never supply an entry point; the profiling steps are skipped
    pub fn none() -> Self {
        Self { entry: None }
    }
}

impl EntryPointResolver for FixedEntryPoint {
    fn resolve(&self, _step_label: &str) -> Option<String> {
        self.entry.as_deref().and_then(normalize)
    }
}

/// Trim the answer; an empty answer means skip
fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
