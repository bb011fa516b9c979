use arrow_array::{ArrayRef, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use assert_cmd::Command;
use parquet::arrow::ArrowWriter;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const BINARY_NAME: &str = "sheets-dashboard";

/// Helper to get a temporary data directory
fn temp_data_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Writes a one-column snapshot with the given `Data` values.
fn write_dates(path: &Path, dates: &[String]) {
    let schema = Arc::new(Schema::new(vec![Field::new("Data", DataType::Utf8, true)]));
    let column: ArrayRef = Arc::new(StringArray::from_iter_values(dates));
    let batch = RecordBatch::try_new(schema.clone(), vec![column]).unwrap();
    let mut writer = ArrowWriter::try_new(File::create(path).unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

/// Config pointing at four snapshots: reunioes has one row per day from
/// 01/01 to 31/01/2024, feedbacks has a single row on 05/03/2024, the other
/// two files are missing.
fn fixture(dir: &Path) -> PathBuf {
    let january: Vec<String> = (1..=31).map(|d| format!("{d:02}/01/2024")).collect();
    write_dates(&dir.join("dados-reunioes.parquet"), &january);
    write_dates(&dir.join("dados-feedbacks.parquet"), &["05/03/2024".to_string()]);

    let config = serde_json::json!({
        "dashboard": {
            "files": {
                "reunioes": dir.join("dados-reunioes.parquet"),
                "feedbacks": dir.join("dados-feedbacks.parquet"),
                "atendimentos": dir.join("dados-atendimentos.parquet"),
                "mapeamentos": dir.join("dados-mapeamentos.parquet"),
            },
            "date_column": "Data"
        }
    });
    let path = dir.join("config.json");
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    path
}

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Command-line arguments"))
        .stdout(contains("dashboard"))
        .stdout(contains("export"));
}

#[test]
/// Headless dashboard prints the summary for the chosen period.
fn headless_dashboard_prints_period_summary() {
    let tmp = temp_data_dir();
    let config = fixture(tmp.path());

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["dashboard", "--headless", "--start", "10/01/2024", "--end", "20/01/2024"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("Resumo do Período: 10/01/2024 a 20/01/2024"))
        .stdout(contains("Reuniões: 11"))
        .stdout(contains("Feedbacks: 0"))
        .stdout(contains("Arquivo não encontrado"));
}

#[test]
/// Without overrides the period spans every dataset.
fn headless_dashboard_defaults_to_global_range() {
    let tmp = temp_data_dir();
    let config = fixture(tmp.path());

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["dashboard", "--headless", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("Resumo do Período: 01/01/2024 a 05/03/2024"))
        .stdout(contains("Reuniões: 31"))
        .stdout(contains("Feedbacks: 1"));
}

#[test]
/// An inverted period stops the pass before any metric is printed.
fn headless_dashboard_rejects_inverted_range() {
    let tmp = temp_data_dir();
    let config = fixture(tmp.path());

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["dashboard", "--headless", "--start", "20/01/2024", "--end", "10/01/2024"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stdout(contains("Erro: A data de início"))
        .stdout(contains("Resumo do Período").not())
        .stdout(contains("Mapeamentos:").not())
        .stderr(contains("RangeValidation").not());
}

#[test]
/// Dates are only accepted in DD/MM/YYYY.
fn headless_dashboard_rejects_malformed_dates() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["dashboard", "--headless", "--start", "2024-01-10"])
        .assert()
        .failure()
        .stderr(contains("DD/MM/YYYY"));
}

#[test]
/// init-config writes a loadable default configuration.
fn init_config_writes_defaults() {
    let tmp = temp_data_dir();
    let path = tmp.path().join("nested").join("config.json");

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("init-config")
        .arg("--path")
        .arg(&path)
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["dashboard"]["date_column"], "Data");
    assert_eq!(written["export"]["tabs"][4]["name"], "status-clientes");
}
