mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

use common::{serve_once, HBA_FASTA, MIXED_FASTA};

#[test]
fn test_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("protexplorer")?;
    cmd.arg("--help");
    cmd.assert().success().stdout(predicate::str::contains("isoelectric point"));

    Ok(())
}

#[test]
fn test_cli_pi_basic_sequence() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::cargo_bin("protexplorer")?.args(["pi", "KKKK"]).output()?;
    assert!(output.status.success());

    let value: f64 = String::from_utf8(output.stdout)?.trim().parse()?;
    assert!(value > 9.0, "poly-K pI should be > 9, got {}", value);

    Ok(())
}

#[test]
fn test_cli_pi_pka_set() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("protexplorer")?;
    cmd.args(["pi", "GGGG", "--pka-set", "emboss"]);
    cmd.assert().success().stdout("6.10\n");

    Ok(())
}

#[test]
fn test_cli_pi_invalid_sequence() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("protexplorer")?;
    cmd.args(["pi", "XYZ123"]);
    cmd.assert().failure().stderr(predicate::str::contains("Invalid amino acid '1'"));

    Ok(())
}

#[test]
fn test_cli_analyze_mixed_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("protexplorer")?;
    cmd.args(["analyze", MIXED_FASTA]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ID: sp|P01308|INS_HUMAN"))
        .stdout(predicate::str::contains("ID: sp|P69905|HBA_HUMAN"))
        .stdout(predicate::str::contains("Isoelectric point (pI):"))
        .stderr(predicate::str::contains("Record 2 (broken_record) skipped"));

    Ok(())
}

#[test]
fn test_cli_analyze_csv() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("protexplorer")?;
    cmd.args(["analyze", MIXED_FASTA, "--format", "csv"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("id,residue,count,frequency"))
        .stdout(predicate::str::contains("sp|P69905|HBA_HUMAN,W,1,"));

    Ok(())
}

#[test]
fn test_cli_analyze_json() -> Result<(), Box<dyn std::error::Error>> {
    let output =
        Command::cargo_bin("protexplorer")?.args(["analyze", MIXED_FASTA, "-f", "json"]).output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["analyses"].as_array().map(|a| a.len()), Some(2));
    assert_eq!(value["failures"][0]["id"], "broken_record");
    assert_eq!(value["analyses"][1]["length"], 142);

    Ok(())
}

#[test]
fn test_cli_analyze_export() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let export_dir = temp_dir.path().join("exports");

    let mut cmd = Command::cargo_bin("protexplorer")?;
    cmd.args(["analyze", MIXED_FASTA, "--export", export_dir.to_str().unwrap()]);
    cmd.assert().success();

    let exported = export_dir.join("analysis_sp_P69905_HBA_HUMAN.txt");
    assert!(exported.exists());
    let content = std::fs::read_to_string(exported)?;
    assert!(content.starts_with("> sp|P69905|HBA_HUMAN Hemoglobin subunit alpha"));
    assert!(content.contains("Isoelectric point: "));

    Ok(())
}

#[test]
fn test_cli_analyze_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::Command::cargo_bin("protexplorer")?;
    cmd.args(["analyze", "-"]).write_stdin(">from_stdin\nFWY\n");
    cmd.assert().success().stdout(predicate::str::contains("F=1 W=1 Y=1"));

    Ok(())
}

#[test]
fn test_cli_analyze_all_invalid() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::Command::cargo_bin("protexplorer")?;
    cmd.args(["analyze", "-"]).write_stdin(">bad\nMK1\n");
    cmd.assert().failure().stderr(predicate::str::contains("none of the 1 record(s)"));

    Ok(())
}

#[test]
fn test_cli_analyze_empty_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let empty = temp_dir.path().join("empty.fasta");
    std::fs::write(&empty, "")?;

    let mut cmd = Command::cargo_bin("protexplorer")?;
    cmd.args(["analyze", empty.to_str().unwrap()]);
    cmd.assert().failure().stderr(predicate::str::contains("FASTA parsing failed"));

    Ok(())
}

#[test]
fn test_cli_analyze_nonexistent_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("protexplorer")?;
    cmd.args(["analyze", "nonexistent.fasta"]);
    cmd.assert().failure().stderr(predicate::str::contains("No such file or directory"));

    Ok(())
}

#[test]
fn test_cli_structure() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let html = temp_dir.path().join("viewer.html");

    let mut cmd = Command::cargo_bin("protexplorer")?;
    cmd.args(["structure", "4hhb", "--html", html.to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Viewer query: pdb:4HHB"))
        .stdout(predicate::str::contains("https://www.rcsb.org/structure/4HHB"));

    assert!(std::fs::read_to_string(html)?.contains("$3Dmol.download"));

    Ok(())
}

#[test]
fn test_cli_structure_invalid_id() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("protexplorer")?;
    cmd.args(["structure", "HBB_HUMAN"]);
    cmd.assert().failure().stderr(predicate::str::contains("Invalid structure identifier"));

    Ok(())
}

#[test]
fn test_cli_fetch() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, handle) = serve_once(200, HBA_FASTA);

    let mut cmd = Command::cargo_bin("protexplorer")?;
    cmd.args(["fetch", "P69905", "--uniprot-url", &base_url]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ID: sp|P69905|HBA_HUMAN"))
        .stdout(predicate::str::contains("Length: 142 amino acids"));

    let request_line = handle.join().expect("server thread");
    assert!(request_line.starts_with("GET /uniprotkb/P69905.fasta"));

    Ok(())
}

#[test]
fn test_cli_fetch_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, handle) = serve_once(404, "");

    let mut cmd = Command::cargo_bin("protexplorer")?;
    cmd.env("PROTEXPLORER_UNIPROT_URL", &base_url).args(["fetch", "NOPE00"]);
    cmd.assert().failure().stderr(predicate::str::contains("Lookup failed for 'NOPE00'"));

    handle.join().expect("server thread");
    Ok(())
}

#[test]
fn test_cli_fetch_export_sequence_needs_dir() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("protexplorer")?;
    cmd.args(["fetch", "P69905", "--export-sequence"]);
    cmd.assert().failure().stderr(predicate::str::contains("needs an --export directory"));

    Ok(())
}

#[test]
fn test_cli_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let config = temp_dir.path().join("protexplorer.toml");
    std::fs::write(&config, "[estimator]\npka_set = \"lehninger\"\n")?;

    let mut cmd = Command::cargo_bin("protexplorer")?;
    cmd.args(["pi", "GGGG", "--config", config.to_str().unwrap(), "--format", "json"]);
    cmd.assert().success().stdout(predicate::str::contains("\"pka_set\": \"lehninger\""));

    Ok(())
}
