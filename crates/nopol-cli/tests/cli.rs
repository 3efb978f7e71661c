use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn nopol(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nopol"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn regions_lists_builtin_table() {
    let dir = tempfile::tempdir().expect("temp dir");
    nopol(dir.path())
        .arg("regions")
        .assert()
        .success()
        .stdout(predicate::str::contains("DKI Jakarta\n"))
        .stdout(predicate::str::starts_with("Aceh\n"));

    nopol(dir.path())
        .args(["regions", "--codes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("West Java\tD,E,F,T,Z\n"));
}

#[test]
fn lookup_resolves_codes() {
    let dir = tempfile::tempdir().expect("temp dir");
    nopol(dir.path())
        .args(["lookup", "B"])
        .assert()
        .success()
        .stdout("DKI Jakarta\n");

    nopol(dir.path())
        .args(["lookup", "ZZ"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown registration code: ZZ"));
}

#[test]
fn plate_respects_region_and_seed() {
    let dir = tempfile::tempdir().expect("temp dir");
    let first = nopol(dir.path())
        .args(["plate", "--region", "DKI Jakarta", "--seed", "1", "-n", "3"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^(B [1-9][0-9]{0,3} [A-HJ-NP-Z]{1,3}\n){3}$").expect("regex"))
        .get_output()
        .stdout
        .clone();

    nopol(dir.path())
        .args(["plate", "--region", "DKI Jakarta", "--seed", "1", "-n", "3"])
        .assert()
        .success()
        .stdout(first);
}

#[test]
fn plate_unknown_region_exits_with_input_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    nopol(dir.path())
        .args(["plate", "--region", "Atlantis"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("Atlantis"));
}

#[test]
fn plate_checks_region_even_without_draws() {
    let dir = tempfile::tempdir().expect("temp dir");
    nopol(dir.path())
        .args(["plate", "--region", "Atlantis", "-n", "0"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("invalid region: Atlantis"));
}

#[test]
fn errors_are_reported_once() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = nopol(dir.path())
        .args(["lookup", "ZZ"])
        .assert()
        .code(2)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("utf8");
    assert_eq!(stderr.matches("ZZ").count(), 1, "{stderr}");
}

#[test]
fn vin_and_engine_formats() {
    let dir = tempfile::tempdir().expect("temp dir");
    nopol(dir.path())
        .args(["vin", "--seed", "1", "-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^(M[A-HJ-NPR-Z0-9]{16}\n){2}$").expect("regex"));

    nopol(dir.path())
        .args(["engine", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[A-Z]{3}[0-9]{7}\n$").expect("regex"));
}

#[test]
fn generate_is_reproducible_with_seed() {
    let dir = tempfile::tempdir().expect("temp dir");
    let args = ["generate", "--seed", "5", "-n", "3", "--format", "jsonl"];
    let first = nopol(dir.path())
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let second = nopol(dir.path())
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(first, second);
    let text = String::from_utf8(first).expect("utf8");
    assert_eq!(text.lines().count(), 3);
    assert!(text.lines().all(|line| line.contains("\"engine_number\"")));
}

#[test]
fn generate_writes_run_artifacts() {
    let dir = tempfile::tempdir().expect("temp dir");
    let runs = dir.path().join("runs");
    nopol(dir.path())
        .args(["generate", "--seed", "9", "-n", "4", "--run-dir"])
        .arg(&runs)
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("run written to"));

    let entries: Vec<_> = fs::read_dir(&runs)
        .expect("run dir")
        .collect::<Result<_, _>>()
        .expect("entries");
    assert_eq!(entries.len(), 1);
    let root = entries[0].path();
    assert!(root.to_string_lossy().contains("__run_"));

    for artifact in ["config.json", "records.csv", "logs.ndjson", "report.json"] {
        assert!(root.join(artifact).exists(), "{artifact}");
    }
    let records = fs::read_to_string(root.join("records.csv")).expect("records");
    assert_eq!(records.lines().count(), 5);
    let report = fs::read_to_string(root.join("report.json")).expect("report");
    assert!(report.contains("\"seed\": 9"));
}

#[test]
fn generate_unknown_region_leaves_no_run_dir() {
    let dir = tempfile::tempdir().expect("temp dir");
    let runs = dir.path().join("runs");
    nopol(dir.path())
        .args(["generate", "--region", "Atlantis", "--run-dir"])
        .arg(&runs)
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("Atlantis"));

    assert!(!runs.exists());
}

#[test]
fn generate_out_file_and_region_fixture() {
    let dir = tempfile::tempdir().expect("temp dir");
    let regions = dir.path().join("regions.json");
    fs::write(&regions, r#"[{"name": "Fixture", "codes": ["Q"]}]"#).expect("write fixture");
    let out = dir.path().join("out").join("records.csv");

    nopol(dir.path())
        .args(["generate", "--seed", "1", "-n", "2", "--regions"])
        .arg(&regions)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout("");

    let csv = fs::read_to_string(&out).expect("out file");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("license_plate,region,vin,engine_number"));
    assert!(lines.all(|line| line.starts_with("Q ") && line.contains(",Fixture,")));
}

#[test]
fn config_file_supplies_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join("nopol.toml"),
        "[generate]\ncount = 2\nregion = \"Bali\"\n\n[engine]\ndigits = 6\n",
    )
    .expect("write config");

    nopol(dir.path())
        .args(["generate", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^license_plate,region,vin,engine_number\n(DK [^\n]*,Bali,[^\n]*,[A-Z]{3}[0-9]{6}\n){2}$").expect("regex"));
}

#[test]
fn malformed_region_file_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let regions = dir.path().join("regions.json");
    fs::write(&regions, "[]").expect("write fixture");

    nopol(dir.path())
        .args(["regions", "--regions"])
        .arg(&regions)
        .assert()
        .code(2);
}
