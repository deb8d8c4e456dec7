//! Exit-code behaviour of the binary, run from a scratch working directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_in(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gatling-junit"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn gatling-junit")
}

#[test]
fn missing_results_dir_exits_with_one() {
    let temp = TempDir::new().unwrap();
    let output = run_in(temp.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Gatling results directory not found"));
}

#[test]
fn no_simulation_runs_exits_with_one() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("target/gatling/othersimulation-1")).unwrap();

    let output = run_in(temp.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No Gatling simulation results found"));
}

#[test]
fn missing_log_exits_with_one() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("target/gatling/javaapitestsimulation-1")).unwrap();

    let output = run_in(temp.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("simulation.log not found"));
}

#[test]
fn successful_run_prints_summary() {
    let temp = TempDir::new().unwrap();
    let run_dir = temp.path().join("target/gatling/javaapitestsimulation-1");
    fs::create_dir_all(&run_dir).unwrap();
    fs::write(
        run_dir.join("simulation.log"),
        "RUN\tS\ts\t1000\nREQUEST\t\tHealth\t1000\t1200\tOK\nREQUEST\t\tHealth\t1300\t1400\tFAIL\n",
    )
    .unwrap();

    let output = run_in(temp.path());

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total requests: 2"));
    assert!(stdout.contains("Successful: 1"));
    assert!(stdout.contains("Failed: 1"));
    assert!(stdout.contains("Success rate: 50.00%"));
    assert!(stdout.contains("Test duration: 0.40 seconds"));
    assert!(temp
        .path()
        .join("target/gatling/junit/TEST-JavaApiTestSimulation.xml")
        .is_file());
}
