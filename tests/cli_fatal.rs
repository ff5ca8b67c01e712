//! Fatal-tier behavior of the binary: a missing target or unresolved tools
//! abort with exit status 1 before any analysis step runs.

use std::process::Command;

fn pyaudit() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pyaudit"))
}

#[test]
fn missing_target_path_exits_with_status_one() {
    let workdir = tempfile::tempdir().unwrap();
    let missing = workdir.path().join("no_such_repo");

    let output = pyaudit()
        .arg(&missing)
        .arg("--non-interactive")
        .current_dir(workdir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr was: {}", stderr);

    // Nothing ran: no report files or output directories appeared
    assert!(!missing.exists());
    assert_eq!(std::fs::read_dir(workdir.path()).unwrap().count(), 0);
}

#[test]
fn unresolved_tools_abort_before_any_step() {
    let target = tempfile::tempdir().unwrap();
    std::fs::write(target.path().join("app.py"), "print('hello')\n").unwrap();

    // An empty search path resolves none of the required tools
    let empty_path = tempfile::tempdir().unwrap();

    let output = pyaudit()
        .arg(target.path())
        .arg("--non-interactive")
        .env("PATH", empty_path.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("required tools are missing"),
        "stderr was: {}",
        stderr
    );
    assert!(stderr.contains("pyan3"), "stderr was: {}", stderr);

    // The target tree was left untouched
    assert!(!target.path().join("ast_output").exists());
    assert!(!target.path().join("lint_report.txt").exists());
    assert_eq!(std::fs::read_dir(target.path()).unwrap().count(), 1);
}
