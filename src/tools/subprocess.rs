//! Subprocess tool invoker - spawns external analyzers and waits on them

use crate::tools::{ToolError, ToolInvoker, ToolOutput, ToolRequest};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs tools as blocking child processes
#[derive(Debug, Clone, Default)]
pub struct SubprocessInvoker;

impl SubprocessInvoker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolInvoker for SubprocessInvoker {
    /// Spawn the requested tool and wait for it to exit
    ///
    /// If the request names a capture file, the report is written before the
    /// exit status is interpreted, so a failing tool still leaves its partial
    /// report on disk.
    async fn run(&self, request: &ToolRequest) -> Result<ToolOutput, ToolError> {
        debug!(
            "Spawning '{}' with {} argument(s)",
            request.program,
            request.args.len()
        );

        let mut command = Command::new(&request.program);
        command.args(&request.args).kill_on_drop(true);
        if let Some(dir) = &request.cwd {
            command.current_dir(dir);
        }

        let output = command.output().await.map_err(|e| ToolError::Spawn {
            program: request.program.clone(),
            source: e,
        })?;

        if let Some(path) = &request.capture {
            let mut report = output.stdout.clone();
            if request.capture_stderr {
                report.extend_from_slice(&output.stderr);
            }
            tokio::fs::write(path, &report)
                .await
                .map_err(|e| ToolError::Capture {
                    path: path.clone(),
                    source: e,
                })?;
        }

        if request.check_status && !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("'{}' exited with code {}: {}", request.program, code, stderr);
            return Err(ToolError::ExitStatus {
                program: request.program.clone(),
                code,
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(
            "'{}' returned {} bytes of output",
            request.program,
            stdout.len()
        );

        Ok(ToolOutput {
            code: output.status.code().unwrap_or(0),
            stdout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_failure_is_an_error() {
        let invoker = SubprocessInvoker::new();
        let request = ToolRequest::new("pyaudit-nonexistent-tool");
        let result = invoker.run(&request).await;
        assert!(matches!(result, Err(ToolError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_checked() {
        let invoker = SubprocessInvoker::new();
        let request = ToolRequest::new("false");
        let result = invoker.run(&request).await;
        match result {
            Err(ToolError::ExitStatus { code, .. }) => assert_eq!(code, 1),
            other => panic!("Expected exit-status error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_ignored() {
        let invoker = SubprocessInvoker::new();
        let request = ToolRequest::new("false").ignore_status();
        let output = invoker.run(&request).await.unwrap();
        assert_eq!(output.code, 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_capture_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("report.txt");

        let invoker = SubprocessInvoker::new();
        let request = ToolRequest::new("echo").arg("hello").capture_to(&report);
        invoker.run(&request).await.unwrap();

        let contents = std::fs::read_to_string(&report).unwrap();
        assert_eq!(contents.trim(), "hello");
    }
}
