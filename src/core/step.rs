//! Step descriptors - the fixed analysis pipeline

use serde::{Deserialize, Serialize};

/// The kind of work a pipeline step performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// Parse-tree dump per source file (`python3 -m ast`)
    AstDump,
    /// Control-flow graph generation - declared unsupported
    ControlFlowGraph,
    /// Call graph via pyan3, rendered with Graphviz
    CallGraph,
    /// Flow-sensitive type analysis via mypy
    DataFlow,
    /// Lint-style static analysis via pylint
    Lint,
    /// Cyclomatic complexity scan via radon
    CyclomaticComplexity,
    /// Module dependency graph via pydeps
    DependencyGraph,
    /// Coverage run over the conventional tests directory
    Coverage,
    /// Memory usage profiling of a user-supplied entry point
    MemoryProfile,
    /// Execution/performance profiling of a user-supplied entry point
    ExecutionProfile,
    /// Runtime type checking under instrumentation of a user-supplied entry point
    RuntimeTypeCheck,
    /// Class hierarchy/composition diagrams via pyreverse
    ClassDiagram,
    /// Semantic analysis - a second, broader mypy pass
    SemanticAnalysis,
    /// Automated test generation - declared unsupported
    TestGeneration,
}

impl StepKind {
    /// Steps that require the user to supply an entry-point script
    pub fn needs_entry_point(&self) -> bool {
        matches!(
            self,
            StepKind::MemoryProfile | StepKind::ExecutionProfile | StepKind::RuntimeTypeCheck
        )
    }

    /// Informational note for steps declared out of scope by design
    ///
    /// `Some` marks the step as unsupported: it only reports the note and
    /// never attempts work.
    pub fn unsupported_note(&self) -> Option<&'static str> {
        match self {
            StepKind::ControlFlowGraph => {
                Some("control-flow graph generation requires target-specific tooling")
            }
            StepKind::TestGeneration => {
                Some("automated test generation requires code-specific configuration")
            }
            _ => None,
        }
    }
}

/// A single step in the fixed pipeline
///
/// Identity is the position in [`PIPELINE`]; `number` is the 1-based display
/// position printed in step banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDescriptor {
    /// 1-based position in the pipeline
    pub number: usize,

    /// Human-readable step label
    pub label: &'static str,

    /// What the step does
    pub kind: StepKind,
}

/// The fixed, ordered analysis pipeline
///
/// Order matters: the runner iterates this table front to back, exactly once
/// per run, regardless of individual step outcomes.
pub const PIPELINE: [StepDescriptor; 14] = [
    StepDescriptor {
        number: 1,
        label: "AST Analysis",
        kind: StepKind::AstDump,
    },
    StepDescriptor {
        number: 2,
        label: "Control Flow Graph Analysis",
        kind: StepKind::ControlFlowGraph,
    },
    StepDescriptor {
        number: 3,
        label: "Call Graph Analysis",
        kind: StepKind::CallGraph,
    },
    StepDescriptor {
        number: 4,
        label: "Data Flow Analysis",
        kind: StepKind::DataFlow,
    },
    StepDescriptor {
        number: 5,
        label: "Static Code Analysis (Linter)",
        kind: StepKind::Lint,
    },
    StepDescriptor {
        number: 6,
        label: "Cyclomatic Complexity Analysis",
        kind: StepKind::CyclomaticComplexity,
    },
    StepDescriptor {
        number: 7,
        label: "Dependency Graph Analysis",
        kind: StepKind::DependencyGraph,
    },
    StepDescriptor {
        number: 8,
        label: "Code Coverage Analysis",
        kind: StepKind::Coverage,
    },
    StepDescriptor {
        number: 9,
        label: "Memory Usage Profiling",
        kind: StepKind::MemoryProfile,
    },
    StepDescriptor {
        number: 10,
        label: "Execution Profiling",
        kind: StepKind::ExecutionProfile,
    },
    StepDescriptor {
        number: 11,
        label: "Runtime Type Checking",
        kind: StepKind::RuntimeTypeCheck,
    },
    StepDescriptor {
        number: 12,
        label: "Class Inheritance Visualization",
        kind: StepKind::ClassDiagram,
    },
    StepDescriptor {
        number: 13,
        label: "Semantic Code Analysis",
        kind: StepKind::SemanticAnalysis,
    },
    StepDescriptor {
        number: 14,
        label: "Automated Test Generation",
        kind: StepKind::TestGeneration,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_has_fourteen_steps_in_order() {
        assert_eq!(PIPELINE.len(), 14);
        for (idx, step) in PIPELINE.iter().enumerate() {
            assert_eq!(step.number, idx + 1);
        }
    }

    #[test]
    fn test_entry_point_steps() {
        let interactive: Vec<usize> = PIPELINE
            .iter()
            .filter(|s| s.kind.needs_entry_point())
            .map(|s| s.number)
            .collect();
        assert_eq!(interactive, vec![9, 10, 11]);
    }

    #[test]
    fn test_unsupported_steps() {
        let unsupported: Vec<usize> = PIPELINE
            .iter()
            .filter(|s| s.kind.unsupported_note().is_some())
            .map(|s| s.number)
            .collect();
        assert_eq!(unsupported, vec![2, 14]);
    }
}
