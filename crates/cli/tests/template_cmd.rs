//! CLI tests for the `loclabel template` subcommand.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

fn loclabel_cmd() -> Command {
    Command::new(cargo::cargo_bin!("loclabel"))
}

#[test]
fn template_writes_the_fixed_bytes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = loclabel_cmd()
        .args(["template", "--out-dir"])
        .arg(dir.path())
        .args(["--output", "json"])
        .output()
        .expect("run template");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written = fs::read(dir.path().join("modelo_localizacao.csv")).expect("template file");
    assert_eq!(
        written,
        b"\xEF\xBB\xBFLOCALIZACAO;QUANTIDADE\nA-01-01;1\nA-01-02;2\nB-05-10;1"
    );

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json output");
    assert_eq!(json["success"], true);
    assert_eq!(json["bytes"], written.len());
}

#[test]
fn template_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("modelo_localizacao.csv");
    fs::write(&target, "meu arquivo").expect("seed file");

    let output = loclabel_cmd()
        .args(["template", "--output", "json", "--out-dir"])
        .arg(dir.path())
        .output()
        .expect("run template");
    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&target).unwrap(), "meu arquivo");

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json envelope");
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "command_failed");
    assert!(
        json["message"]
            .as_str()
            .is_some_and(|m| m.contains("--force")),
        "unexpected message: {}",
        json["message"]
    );

    let output = loclabel_cmd()
        .args(["template", "--force", "--output", "json", "--out-dir"])
        .arg(dir.path())
        .output()
        .expect("run template --force");
    assert!(output.status.success());
    assert!(fs::read(&target).unwrap().starts_with(b"\xEF\xBB\xBFLOCALIZACAO"));
}

#[test]
fn template_creates_the_output_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("saida").join("modelos");
    let output = loclabel_cmd()
        .args(["template", "--output", "pretty", "--out-dir"])
        .arg(&nested)
        .output()
        .expect("run template");
    assert!(output.status.success());
    assert!(nested.join("modelo_localizacao.csv").is_file());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("modelo gravado"), "stderr={stderr}");
}
