//! Individual analysis steps - thin invocation glue over external tools
//!
//! Each function resolves the step's output location, builds the tool
//! request(s), and reports the produced artifacts. Failure isolation lives in
//! the runner; here a failure is just an error return.

use crate::core::{AnalyzerConfig, StepOutcome};
use crate::tools::{ToolError, ToolInvoker, ToolRequest};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Error raised by a single analysis step
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Collect the target tree's Python source files, in a stable order
fn python_files(target: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(target)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "py"))
        .collect();
    files.sort();
    files
}

/// Step 1: dump the parse tree of every source file
///
/// Per-file failures (for example syntax errors) warn and continue; the step
/// as a whole still completes with whatever dumps were produced.
pub async fn ast_dump(
    config: &AnalyzerConfig,
    target: &Path,
    invoker: &dyn ToolInvoker,
) -> Result<StepOutcome, StepError> {
    let out_dir = target.join("ast_output");
    tokio::fs::create_dir_all(&out_dir).await?;

    let mut dumped = 0usize;
    for file in python_files(target) {
        let file_name = match file.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        let dump = out_dir.join(format!("{}{}", file_name, config.ast_format));

        let request = ToolRequest::new("python3")
            .args(["-m", "ast"])
            .path_arg(&file)
            .capture_stdout_to(&dump);

        match invoker.run(&request).await {
            Ok(_) => {
                dumped += 1;
                if config.verbosity.is_detailed() {
                    debug!("Parse tree for {} saved to {}", file.display(), dump.display());
                }
            }
            Err(e) => warn!("Failed to dump parse tree for {}: {}", file.display(), e),
        }
    }

    debug!("Dumped {} parse tree(s) to {}", dumped, out_dir.display());
    Ok(StepOutcome::Completed {
        artifacts: vec![out_dir],
    })
}

/// Step 3: call graph via pyan3, rendered to an image with Graphviz
pub async fn call_graph(
    config: &AnalyzerConfig,
    target: &Path,
    invoker: &dyn ToolInvoker,
) -> Result<StepOutcome, StepError> {
    let files = python_files(target);
    if files.is_empty() {
        return Ok(StepOutcome::Skipped {
            reason: "no Python source files found".to_string(),
        });
    }

    let out_dir = target.join("call_graph_output");
    tokio::fs::create_dir_all(&out_dir).await?;

    let dot_file = out_dir.join("call_graph.dot");
    let request = files
        .iter()
        .fold(ToolRequest::new("pyan3"), |req, file| req.path_arg(file))
        .args(["--dot", "--colored"])
        .capture_stdout_to(&dot_file);
    invoker.run(&request).await?;

    let image = out_dir.join(format!("call_graph{}", config.call_graph_format));
    let render = ToolRequest::new("dot")
        .arg("-Tpng")
        .path_arg(&dot_file)
        .arg("-o")
        .path_arg(&image);
    invoker.run(&render).await?;

    Ok(StepOutcome::Completed {
        artifacts: vec![image],
    })
}

/// Step 4: flow-sensitive type analysis via mypy, pretty report
pub async fn data_flow(
    config: &AnalyzerConfig,
    target: &Path,
    invoker: &dyn ToolInvoker,
) -> Result<StepOutcome, StepError> {
    let report = config.report_path(target, "data_flow_analysis", &config.data_flow_format);
    let request = ToolRequest::new("mypy")
        .path_arg(target)
        .args(["--show-error-codes", "--pretty"])
        .capture_to(&report)
        .ignore_status();
    invoker.run(&request).await?;

    Ok(StepOutcome::Completed {
        artifacts: vec![report],
    })
}

/// Step 5: lint-style static analysis via pylint
pub async fn lint(
    config: &AnalyzerConfig,
    target: &Path,
    invoker: &dyn ToolInvoker,
) -> Result<StepOutcome, StepError> {
    let report = config.report_path(target, "lint_report", &config.lint_format);
    let request = ToolRequest::new("pylint")
        .path_arg(target)
        .capture_to(&report)
        .ignore_status();
    invoker.run(&request).await?;

    Ok(StepOutcome::Completed {
        artifacts: vec![report],
    })
}

/// Step 6: cyclomatic complexity scan via radon
pub async fn cyclomatic_complexity(
    config: &AnalyzerConfig,
    target: &Path,
    invoker: &dyn ToolInvoker,
) -> Result<StepOutcome, StepError> {
    let report = config.report_path(target, "cyclomatic_complexity", &config.complexity_format);
    let request = ToolRequest::new("radon")
        .arg("cc")
        .path_arg(target)
        .arg("-s")
        .capture_to(&report)
        .ignore_status();
    invoker.run(&request).await?;

    Ok(StepOutcome::Completed {
        artifacts: vec![report],
    })
}

/// Step 7: module dependency graph via pydeps
pub async fn dependency_graph(
    config: &AnalyzerConfig,
    target: &Path,
    invoker: &dyn ToolInvoker,
) -> Result<StepOutcome, StepError> {
    let graph = config.report_path(target, "dependency_graph", &config.dependency_graph_format);
    let request = ToolRequest::new("pydeps")
        .path_arg(target)
        .args(["--noshow", "--max-bacon=2", "--output"])
        .path_arg(&graph);
    invoker.run(&request).await?;

    Ok(StepOutcome::Completed {
        artifacts: vec![graph],
    })
}

/// Step 8: coverage over the conventional tests directory
///
/// Only attempted when `<target>/tests` exists; otherwise the step is a
/// voluntary skip, not a failure.
pub async fn coverage(
    config: &AnalyzerConfig,
    target: &Path,
    invoker: &dyn ToolInvoker,
) -> Result<StepOutcome, StepError> {
    let tests_dir = target.join("tests");
    if !tests_dir.is_dir() {
        return Ok(StepOutcome::Skipped {
            reason: "no tests directory found".to_string(),
        });
    }

    let run = ToolRequest::new("coverage")
        .args(["run", "-m", "unittest", "discover", "tests"])
        .current_dir(target);
    invoker.run(&run).await?;

    let html_dir = target.join("htmlcov");
    let html = ToolRequest::new("coverage")
        .args(["html", "-d"])
        .path_arg(&html_dir)
        .current_dir(target);
    invoker.run(&html).await?;

    Ok(StepOutcome::Completed {
        artifacts: vec![html_dir],
    })
}

/// Step 9: memory profiling of the supplied entry point
pub async fn memory_profile(
    config: &AnalyzerConfig,
    target: &Path,
    entry: &str,
    invoker: &dyn ToolInvoker,
) -> Result<StepOutcome, StepError> {
    let report = config.report_path(target, "memory_profile", &config.memory_profile_format);
    let request = ToolRequest::new("python3")
        .args(["-m", "memory_profiler"])
        .arg(entry)
        .current_dir(target)
        .capture_to(&report);
    invoker.run(&request).await?;

    Ok(StepOutcome::Completed {
        artifacts: vec![report],
    })
}

/// Step 10: execution/performance profiling of the supplied entry point
pub async fn execution_profile(
    config: &AnalyzerConfig,
    target: &Path,
    entry: &str,
    invoker: &dyn ToolInvoker,
) -> Result<StepOutcome, StepError> {
    let report = config.report_path(
        target,
        "performance_profile",
        &config.performance_profile_format,
    );
    let request = ToolRequest::new("python3")
        .args(["-m", "cProfile", "-s", "cumulative"])
        .arg(entry)
        .current_dir(target)
        .capture_to(&report);
    invoker.run(&request).await?;

    Ok(StepOutcome::Completed {
        artifacts: vec![report],
    })
}

/// Step 11: runtime type checking under instrumentation (monkeytype)
pub async fn runtime_type_check(
    config: &AnalyzerConfig,
    target: &Path,
    entry: &str,
    invoker: &dyn ToolInvoker,
) -> Result<StepOutcome, StepError> {
    let report = config.report_path(
        target,
        "runtime_type_check",
        &config.runtime_type_check_format,
    );
    let request = ToolRequest::new("monkeytype")
        .arg("run")
        .arg(entry)
        .current_dir(target)
        .capture_to(&report);
    invoker.run(&request).await?;

    Ok(StepOutcome::Completed {
        artifacts: vec![report],
    })
}

/// Step 12: class hierarchy/composition diagrams via pyreverse
///
/// pyreverse writes into its working directory; individually missing diagram
/// files warn but do not fail the step.
pub async fn class_diagram(
    config: &AnalyzerConfig,
    target: &Path,
    invoker: &dyn ToolInvoker,
) -> Result<StepOutcome, StepError> {
    let request = ToolRequest::new("pyreverse")
        .arg(".")
        .args(["-o", &config.diagram_format, "-p", "classes"])
        .current_dir(target);
    invoker.run(&request).await?;

    let expected = [
        format!("classes_classes.{}", config.diagram_format),
        format!("classes_packages.{}", config.diagram_format),
    ];

    let mut artifacts = Vec::new();
    for name in &expected {
        let diagram = target.join(name);
        if diagram.exists() {
            artifacts.push(diagram);
        } else {
            warn!("Expected diagram {} was not generated", diagram.display());
        }
    }

    Ok(StepOutcome::Completed { artifacts })
}

/// Step 13: semantic analysis - a second, broader mypy pass
pub async fn semantic_analysis(
    config: &AnalyzerConfig,
    target: &Path,
    invoker: &dyn ToolInvoker,
) -> Result<StepOutcome, StepError> {
    let report = config.report_path(target, "semantic_analysis", &config.semantic_format);
    let request = ToolRequest::new("mypy")
        .path_arg(target)
        .capture_to(&report)
        .ignore_status();
    invoker.run(&request).await?;

    Ok(StepOutcome::Completed {
        artifacts: vec![report],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.py"), "x = 1\n").unwrap();
        std::fs::write(dir.path().join("a.py"), "y = 2\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not python\n").unwrap();
        std::fs::create_dir(dir.path().join("pkg")).unwrap();
        std::fs::write(dir.path().join("pkg/c.py"), "z = 3\n").unwrap();

        let files = python_files(dir.path());
        let names: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(dir.path())
                    .unwrap()
                    .display()
                    .to_string()
            })
            .collect();
        assert_eq!(names, vec!["a.py", "b.py", "pkg/c.py"]);
    }
}
