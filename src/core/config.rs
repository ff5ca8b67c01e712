//! Analyzer configuration
//!
//! Report format suffixes and verbosity live in an explicit config struct
//! passed into the runner at construction, not in module-wide state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How much per-step detail to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verbosity {
    /// One status line per step
    Minimal,
    /// Additionally log per-file progress inside steps
    Detailed,
}

impl Verbosity {
    pub fn is_detailed(&self) -> bool {
        matches!(self, Verbosity::Detailed)
    }
}

/// Configuration for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Per-step output detail
    pub verbosity: Verbosity,

    /// Suffix for per-file parse-tree dumps
    pub ast_format: String,

    /// Suffix for the rendered call graph
    pub call_graph_format: String,

    /// Suffix for the mypy data-flow report
    pub data_flow_format: String,

    /// Suffix for the pylint report
    pub lint_format: String,

    /// Suffix for the radon complexity report
    pub complexity_format: String,

    /// Suffix for the pydeps dependency graph
    pub dependency_graph_format: String,

    /// Suffix for the memory profile report
    pub memory_profile_format: String,

    /// Suffix for the performance profile report
    pub performance_profile_format: String,

    /// Suffix for the runtime type-check log
    pub runtime_type_check_format: String,

    /// Image format passed to pyreverse (no leading dot)
    pub diagram_format: String,

    /// Suffix for the semantic analysis report
    pub semantic_format: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Minimal,
            ast_format: ".txt".to_string(),
            call_graph_format: ".png".to_string(),
            data_flow_format: ".txt".to_string(),
            lint_format: ".txt".to_string(),
            complexity_format: ".txt".to_string(),
            dependency_graph_format: ".png".to_string(),
            memory_profile_format: ".txt".to_string(),
            performance_profile_format: ".txt".to_string(),
            runtime_type_check_format: ".txt".to_string(),
            diagram_format: "png".to_string(),
            semantic_format: ".txt".to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Create a config with default formats
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Path for a single-file report, e.g. `lint_report.txt`
    ///
    /// Every step writes its artifacts inside the target tree, next to the
    /// code they describe. The tools that pick their own output location
    /// (coverage, pyreverse) are run with the target as their working
    /// directory so they follow the same convention.
    pub fn report_path(&self, target: &Path, stem: &str, suffix: &str) -> PathBuf {
        target.join(format!("{}{}", stem, suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formats() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.ast_format, ".txt");
        assert_eq!(config.call_graph_format, ".png");
        assert_eq!(config.diagram_format, "png");
        assert_eq!(config.verbosity, Verbosity::Minimal);
    }

    #[test]
    fn test_report_path_in_target_tree() {
        let config = AnalyzerConfig::default();
        let path = config.report_path(Path::new("/repo"), "lint_report", &config.lint_format);
        assert_eq!(path, PathBuf::from("/repo/lint_report.txt"));
    }
}
