//! CLI tests for the `loclabel generate` subcommand.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::cargo;

fn loclabel_cmd() -> Command {
    Command::new(cargo::cargo_bin!("loclabel"))
}

fn write_input(dir: &Path, content: &str) -> String {
    let path = dir.join("locais.csv");
    fs::write(&path, content).expect("write input");
    path.to_string_lossy().to_string()
}

fn page_count(path: &Path) -> usize {
    lopdf::Document::load(path)
        .unwrap_or_else(|e| panic!("{} is not a readable PDF: {e}", path.display()))
        .get_pages()
        .len()
}

#[test]
fn generate_writes_one_page_per_copy() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), "LOCALIZACAO;QUANTIDADE\nA-01-01;2\nB-05-10;1\n");

    let output = loclabel_cmd()
        .args(["generate", &input, "--output", "json", "--out-dir"])
        .arg(dir.path())
        .output()
        .expect("run generate");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let pdf = dir.path().join("etiquetas_localizacao.pdf");
    assert_eq!(page_count(&pdf), 3);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(json["success"], true);
    assert_eq!(json["pages"], 3);
    assert_eq!(json["codes"], 2);
    assert_eq!(json["bytes"], fs::metadata(&pdf).unwrap().len());
    assert_eq!(json["failed"], serde_json::json!([]));
}

#[test]
fn generate_from_template_prints_four_labels() {
    let dir = tempfile::tempdir().expect("tempdir");
    let status = loclabel_cmd()
        .args(["template", "--output", "json", "--out-dir"])
        .arg(dir.path())
        .output()
        .expect("run template")
        .status;
    assert!(status.success());

    let template = dir.path().join("modelo_localizacao.csv");
    let output = loclabel_cmd()
        .arg("generate")
        .arg(&template)
        .args(["--output", "json", "--out-dir"])
        .arg(dir.path())
        .output()
        .expect("run generate");
    assert!(output.status.success());
    assert_eq!(page_count(&dir.path().join("etiquetas_localizacao.pdf")), 4);
}

#[test]
fn generate_skips_unencodable_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), "LOCALIZACAO\nA\nSALA-Ç\nB\n");

    let output = loclabel_cmd()
        .args(["generate", &input, "--output", "json", "--out-dir"])
        .arg(dir.path())
        .output()
        .expect("run generate");
    assert!(output.status.success());
    assert_eq!(page_count(&dir.path().join("etiquetas_localizacao.pdf")), 2);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(json["failed"][0]["line"], 3);
}

#[test]
fn generate_with_only_bad_codes_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), "LOCALIZACAO\nÇ-01\n");

    let output = loclabel_cmd()
        .args(["generate", &input, "--output", "json", "--out-dir"])
        .arg(dir.path())
        .output()
        .expect("run generate");
    assert!(!output.status.success());
    assert!(!dir.path().join("etiquetas_localizacao.pdf").exists());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json envelope");
    assert_eq!(json["error"], "no_labels_rendered");
    assert_eq!(json["failed"][0]["code"], "Ç-01");
}

#[test]
fn generate_header_only_reports_no_data() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), "LOCALIZACAO;QUANTIDADE\n");

    let output = loclabel_cmd()
        .args(["generate", &input, "--output", "json", "--out-dir"])
        .arg(dir.path())
        .output()
        .expect("run generate");
    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json envelope");
    assert_eq!(json["error"], "no_data_to_export");
    assert_eq!(json["message"], "Nenhum dado para exportar.");
}

#[test]
fn generate_keeps_an_existing_pdf_without_force() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), "LOCALIZACAO\nA-01-01\n");
    let pdf = dir.path().join("etiquetas_localizacao.pdf");
    fs::write(&pdf, "antigo").expect("seed pdf");

    let output = loclabel_cmd()
        .args(["generate", &input, "--output", "json", "--out-dir"])
        .arg(dir.path())
        .output()
        .expect("run generate");
    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&pdf).unwrap(), "antigo");

    let output = loclabel_cmd()
        .args(["generate", &input, "--force", "--output", "json", "--out-dir"])
        .arg(dir.path())
        .output()
        .expect("run generate --force");
    assert!(output.status.success());
    assert_eq!(page_count(&pdf), 1);
}

#[test]
fn generate_pretty_reports_to_stderr() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), "LOCALIZACAO;QUANTIDADE\nA-01-01;3\n");

    let output = loclabel_cmd()
        .args(["generate", &input, "--output", "pretty", "--out-dir"])
        .arg(dir.path())
        .output()
        .expect("run generate");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("3 etiquetas geradas"), "stderr={stderr}");
}
