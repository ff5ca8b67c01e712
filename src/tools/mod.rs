//! External analysis tool invocation

pub mod requirements;
pub mod subprocess;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use requirements::{RequirementChecker, REQUIRED_TOOLS};
pub use subprocess::SubprocessInvoker;

/// Error types for tool invocation
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with code {code}: {stderr}")]
    ExitStatus {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("failed to write report to {path}: {source}")]
    Capture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One external tool invocation: program, arguments, and output handling
#[derive(Debug, Clone)]
pub struct ToolRequest {
    /// Program name, resolved via the search path
    pub program: String,

    /// Arguments in order
    pub args: Vec<String>,

    /// Working directory for the child process
    pub cwd: Option<PathBuf>,

    /// Write the child's output to this file
    pub capture: Option<PathBuf>,

    /// Whether stderr is merged into the captured report
    pub capture_stderr: bool,

    /// Whether a non-zero exit status is an error
    pub check_status: bool,
}

impl ToolRequest {
    /// Create a request; non-zero exit is an error by default
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            capture: None,
            capture_stderr: true,
            check_status: true,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.display().to_string())
    }

    /// Run the child in the given working directory
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Capture stdout and stderr, merged, to a report file
    pub fn capture_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.capture = Some(path.into());
        self.capture_stderr = true;
        self
    }

    /// Capture stdout only to a file (for machine-readable output like `.dot`)
    pub fn capture_stdout_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.capture = Some(path.into());
        self.capture_stderr = false;
        self
    }

    /// Treat a non-zero exit status as success (linters exit non-zero on findings)
    pub fn ignore_status(mut self) -> Self {
        self.check_status = false;
        self
    }
}

/// Result of a tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// The child's exit code (-1 when killed by a signal)
    pub code: i32,

    /// Captured stdout
    pub stdout: String,
}

/// Trait for running external tools - allows tests to substitute a mock
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Run the tool to completion and interpret its exit status
    async fn run(&self, request: &ToolRequest) -> Result<ToolOutput, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = ToolRequest::new("mypy")
            .arg("src")
            .args(["--show-error-codes", "--pretty"])
            .capture_to("/repo/data_flow_analysis.txt")
            .ignore_status();

        assert_eq!(request.program, "mypy");
        assert_eq!(request.args, vec!["src", "--show-error-codes", "--pretty"]);
        assert_eq!(
            request.capture,
            Some(PathBuf::from("/repo/data_flow_analysis.txt"))
        );
        assert!(request.capture_stderr);
        assert!(!request.check_status);
    }

    #[test]
    fn test_stdout_only_capture() {
        let request = ToolRequest::new("pyan3").capture_stdout_to("call_graph.dot");
        assert!(!request.capture_stderr);
        assert!(request.check_status);
    }
}
