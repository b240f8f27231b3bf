use assert_cmd::{cargo_bin_cmd, Command};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// studylog with its data directory pinned to `dir`.
fn studylog(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("studylog");
    cmd.env_remove("STUDYLOG_LOG")
        .env("NO_COLOR", "1")
        .arg("--data-dir")
        .arg(dir.path());
    cmd
}

fn add(dir: &TempDir, subject: &str, energy: &str, notes: &str) {
    studylog(dir)
        .args(["log", "add", "--subject", subject, "--energy", energy, "--notes", notes])
        .assert()
        .success();
}

#[test]
fn test_add_then_recent_json() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Math", "5", "ok");

    let output = studylog(&dir)
        .args(["log", "recent", "-n", "1", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["count"], 1);
    assert_eq!(value["items"][0]["subject"], "Math");
    assert_eq!(value["items"][0]["energy"], 5);
    assert_eq!(value["items"][0]["notes"], "ok");
}

#[test]
fn test_invalid_energy_fails() {
    let dir = TempDir::new().unwrap();

    studylog(&dir)
        .args(["log", "add", "--subject", "Math", "--energy", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("energy level must be between 1 and 5"));

    studylog(&dir)
        .args(["log", "list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 0"));
}

#[test]
fn test_export_stdout_two_records() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Math", "5", "ok");
    add(&dir, "Art", "3", "a, b");

    let output = studylog(&dir)
        .args(["log", "export", "--stdout"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Data,Materia,Energia,Notas");
    assert!(lines[1].ends_with(",Art,3,\"a, b\""));
    assert!(lines[2].ends_with(",Math,5,\"ok\""));
}

#[test]
fn test_export_default_file() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Math", "4", "");

    studylog(&dir)
        .current_dir(dir.path())
        .args(["log", "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("historico_estudos.csv"));

    let csv = std::fs::read_to_string(dir.path().join("historico_estudos.csv")).unwrap();
    assert!(csv.starts_with("Data,Materia,Energia,Notas\n"));
}

#[test]
fn test_clear_requires_force() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Math", "4", "");

    studylog(&dir)
        .args(["log", "clear"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    studylog(&dir)
        .args(["log", "clear", "--force"])
        .assert()
        .success();

    studylog(&dir)
        .args(["log", "list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 0"));
}

#[test]
fn test_json_backend_from_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.yaml"), "storage:\n  backend: json\n").unwrap();
    add(&dir, "Math", "4", "");

    let stored = std::fs::read_to_string(dir.path().join("sessions.json")).unwrap();
    assert!(stored.contains("\"subject\": \"Math\"") || stored.contains("\"subject\":\"Math\""));
    assert!(!dir.path().join("studylog.db").exists());
}

#[test]
fn test_techniques_lists_rotation() {
    let dir = TempDir::new().unwrap();
    studylog(&dir)
        .arg("techniques")
        .assert()
        .success()
        .stdout(predicate::str::contains("Feynman Technique"))
        .stdout(predicate::str::contains("Elaboration"));
}

#[test]
fn test_techniques_next_carries_over() {
    let dir = TempDir::new().unwrap();
    studylog(&dir)
        .args(["techniques", "--next"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Active Recall"));
    studylog(&dir)
        .args(["techniques", "--next"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Spaced Repetition"));

    let out = studylog(&dir)
        .args(["techniques", "-o", "json"])
        .output()
        .unwrap();
    let value: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["items"][2]["current"], true);
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    studylog(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("studylog"));
}

#[test]
fn test_config_path_uses_data_dir() {
    let dir = TempDir::new().unwrap();
    studylog(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}
