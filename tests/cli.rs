use assert_cmd::Command;
use std::io::Write;

#[test]
fn runs() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.assert().success();
}

#[test]
fn outputs_tool_name() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("paramgate"));
}

// Resolve subcommand tests

#[test]
fn resolve_full_log_succeeds() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.args(["resolve", "tests/fixtures/sample_logs.json"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Resolved hyper parameters"))
        .stdout(predicates::str::contains("epochs = 50"))
        .stdout(predicates::str::contains("optimizer = AdamW"));
}

#[test]
fn resolve_annotates_defaults() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.args(["resolve", "tests/fixtures/sparse_logs.json"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("epochs = 10"))
        .stdout(predicates::str::contains("momentum = 0.9 (default)"));
}

#[test]
fn resolve_strict_fails_on_defaults() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.args(["resolve", "tests/fixtures/sparse_logs.json", "--strict"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("fell back to defaults"));
}

#[test]
fn resolve_strict_passes_a_full_log() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.args(["resolve", "tests/fixtures/sample_logs.json", "--strict"]);
    cmd.assert().success();
}

#[test]
fn resolve_export_set() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.args([
        "resolve",
        "tests/fixtures/sample_logs.json",
        "--set",
        "export",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Resolved export parameters"))
        .stdout(predicates::str::contains("export_format = onnx"))
        .stdout(predicates::str::contains("opset = 17"));
}

#[test]
fn resolve_augmentation_set() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.args([
        "resolve",
        "tests/fixtures/sample_logs.json",
        "--set",
        "augmentation",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("degrees = 10"))
        .stdout(predicates::str::contains("mosaic = 1"));
}

#[test]
fn resolve_unknown_set_fails() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.args([
        "resolve",
        "tests/fixtures/sample_logs.json",
        "--set",
        "bogus",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Unknown parameter set"));
}

#[test]
fn resolve_json_output_format() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.args([
        "resolve",
        "tests/fixtures/sample_logs.json",
        "--output",
        "json",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("\"set_name\": \"hyper\""))
        .stdout(predicates::str::contains("\"epochs\": 50"));
}

#[test]
fn resolve_reports_precision_loss() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.args(["resolve", "tests/fixtures/bad_logs.json"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("losing precision"));
}

#[test]
fn resolve_rejects_non_object_log_data() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.args(["resolve", "tests/fixtures/not_an_object.json"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("must be a JSON object"));
}

#[test]
fn resolve_nonexistent_file_fails() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.args(["resolve", "nonexistent_file.json"]);
    cmd.assert().failure();
}

#[test]
fn resolve_template_set() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.args([
        "resolve",
        "tests/fixtures/processing_logs.json",
        "--template",
        "tests/fixtures/template.json",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Resolved template parameters"))
        .stdout(predicates::str::contains("threshold = 0.25"))
        .stdout(predicates::str::contains("tile_size = 256"))
        .stdout(predicates::str::contains("save_crops = false"));
}

#[test]
fn resolve_template_missing_key_fails() {
    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.args([
        "resolve",
        "tests/fixtures/sparse_logs.json",
        "--template",
        "tests/fixtures/template.json",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("not found"));
}

#[test]
fn resolve_missing_required_epochs_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{}}").unwrap();

    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.arg("resolve").arg(file.path());
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("epochs"))
        .stderr(predicates::str::contains("not found"));
}

#[test]
fn resolve_malformed_json_names_the_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{not json").unwrap();

    let mut cmd = Command::cargo_bin("paramgate").unwrap();
    cmd.arg("resolve").arg(file.path());
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Failed to parse log data JSON"));
}
