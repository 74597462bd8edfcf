use std::fs;

use schedsim::{PolicyKind, SimConfig, SimError, sim::trace::run_trace};
use tempfile::TempDir;

fn write_trace(dir: &TempDir, text: &str) -> std::path::PathBuf {
    let path = dir.path().join("trace.txt");
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn output_is_sorted_by_id() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(&dir, "1, 0, 10\n2, 2, 3\n");
    let out = dir.path().join("out.txt");

    let report = run_trace(&SimConfig::new(&trace, &out, PolicyKind::Srpt)).unwrap();
    assert_eq!(report.completions[0].id, 2, "report keeps completion order");
    assert_eq!(fs::read_to_string(&out).unwrap(), "1, 13\n2, 5\n");
}

#[test]
fn no_sort_keeps_completion_order() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(&dir, "1, 0, 10\n2, 2, 3\n");
    let out = dir.path().join("out.txt");

    let config = SimConfig::new(&trace, &out, PolicyKind::Srpt).with_sort_output(false);
    run_trace(&config).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), "2, 5\n1, 13\n");
}

#[test]
fn trailing_garbage_line_ends_the_trace() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(&dir, "1, 0, 5\n2, 0, 3\nend\n");
    let out = dir.path().join("out.txt");

    let report = run_trace(&SimConfig::new(&trace, &out, PolicyKind::Fcfs)).unwrap();
    assert_eq!(report.completions.len(), 2);
    assert_eq!(fs::read_to_string(&out).unwrap(), "1, 5\n2, 8\n");
}

#[test]
fn missing_trace_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let config = SimConfig::new(
        dir.path().join("absent.txt"),
        dir.path().join("out.txt"),
        PolicyKind::Ps,
    );
    assert!(matches!(run_trace(&config), Err(SimError::Io(_))));
}

#[test]
fn fb_fails_before_writing_output() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(&dir, "1, 0, 5\n");
    let out = dir.path().join("out.txt");

    let err = run_trace(&SimConfig::new(&trace, &out, PolicyKind::Fb)).unwrap_err();
    assert!(matches!(err, SimError::UnimplementedPolicy(PolicyKind::Fb)));
    assert!(!out.exists());
}
