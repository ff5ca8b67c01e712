//! Pre-flight requirement check for external tools

use std::ffi::OsString;
use std::path::PathBuf;

/// External tools the pipeline invokes unconditionally
///
/// Presence is checked once, before any step runs. Tools for the optional
/// entry-point steps (memory_profiler, monkeytype) are deliberately absent:
/// those steps may be skipped entirely, so a missing tool there is a per-step
/// failure, not a fatal one.
pub const REQUIRED_TOOLS: &[&str] = &[
    "python3",
    "pyan3",
    "mypy",
    "pylint",
    "radon",
    "pydeps",
    "coverage",
    "pyreverse",
    "dot", // Graphviz
];

/// Verifies that required external tools are resolvable on the search path
///
/// Pure availability check: no version or capability validation.
pub struct RequirementChecker {
    tools: Vec<String>,
    search_path: Option<OsString>,
}

impl RequirementChecker {
    /// Create a checker over the given tool names, using the process PATH
    pub fn new(tools: &[&str]) -> Self {
        Self {
            tools: tools.iter().map(|t| t.to_string()).collect(),
            search_path: None,
        }
    }

    /// Resolve against an explicit search path instead of the process PATH
    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    /// The subset of tools that cannot be resolved, in declaration order
    pub fn missing(&self) -> Vec<String> {
        self.tools
            .iter()
            .filter(|tool| !self.resolves(tool))
            .cloned()
            .collect()
    }

    fn resolves(&self, tool: &str) -> bool {
        match &self.search_path {
            Some(path) => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                which::which_in(tool, Some(path), cwd).is_ok()
            }
            None => which::which(tool).is_ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tool_list_has_no_missing() {
        let checker = RequirementChecker::new(&[]);
        assert!(checker.missing().is_empty());
    }

    #[test]
    fn test_unresolvable_tool_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let checker = RequirementChecker::new(&["pyaudit-no-such-tool"])
            .with_search_path(dir.path().as_os_str().to_os_string());
        assert_eq!(checker.missing(), vec!["pyaudit-no-such-tool".to_string()]);
    }

    #[test]
    fn test_missing_preserves_declaration_order() {
        let dir = tempfile::tempdir().unwrap();
        let checker = RequirementChecker::new(&["zeta-tool", "alpha-tool"])
            .with_search_path(dir.path().as_os_str().to_os_string());
        assert_eq!(
            checker.missing(),
            vec!["zeta-tool".to_string(), "alpha-tool".to_string()]
        );
    }
}
