//! Error handling integration tests

use super::fixtures::StationFileBuilder;
use crate::config::ValidatorConfig;
use crate::error::ValidatorError;
use crate::models::FindingCategory;
use crate::processor::DirectoryValidator;
use crate::processor::file_validator::validate_file;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_invalid_config_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = ValidatorConfig::default().with_workers(0);

    let result = DirectoryValidator::new(temp_dir.path().to_path_buf(), config);
    match result.unwrap_err() {
        ValidatorError::Configuration { message } => {
            assert!(message.contains("worker"));
        }
        other => panic!("Expected Configuration error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_directory_yields_empty_run() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("errores.log");
    let config = ValidatorConfig::default()
        .with_log_path(&log_path)
        .without_progress();

    let validator = DirectoryValidator::new(temp_dir.path().join("nonexistent"), config).unwrap();
    let run = validator.run().await.unwrap();

    assert_eq!(run.summary.total, 0);
    let log = fs::read_to_string(&log_path).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("cannot list directory"));
}

#[tokio::test]
async fn test_unopenable_log_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let config = ValidatorConfig::default()
        .with_log_path(temp_dir.path().join("no-such-dir").join("errores.log"))
        .without_progress();

    let validator = DirectoryValidator::new(temp_dir.path().to_path_buf(), config).unwrap();
    assert!(matches!(
        validator.run().await,
        Err(ValidatorError::LogUnavailable { .. })
    ));
}

#[test]
fn test_missing_file_is_single_structural_finding() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("precip.P9.MIROC5.dat");

    let report = validate_file(&path, &ValidatorConfig::default());
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.count(FindingCategory::Structural), 1);
    assert!(report.findings[0].message.contains("cannot open"));
}

#[test]
fn test_non_utf8_content_stops_reading() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("precip.P5.MIROC5.dat");
    let mut content = StationFileBuilder::new(5).months(2).build().into_bytes();
    content.extend_from_slice(&[0xff, 0xfe, b'\n']);
    fs::write(&path, content).unwrap();

    let report = validate_file(&path, &ValidatorConfig::default());
    assert_eq!(report.records_checked, 2);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.count(FindingCategory::Structural), 1);
    assert_eq!(report.findings[0].line_number, Some(5));
}

#[test]
fn test_single_line_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("precip.P5.MIROC5.dat");
    fs::write(&path, "precip\tMIROC5\tRCP60\tREGRESION\tdecimas\t1\n").unwrap();

    let report = validate_file(&path, &ValidatorConfig::default());
    assert_eq!(report.findings.len(), 1);
    assert!(report.findings[0].message.contains("not enough lines"));
}

#[tokio::test]
async fn test_bad_file_does_not_stop_scan() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("stations");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("precip.P1.MIROC5.dat"), "garbage").unwrap();
    StationFileBuilder::new(2).months(5).write_to(&dir);

    let config = ValidatorConfig::default()
        .with_log_path(temp_dir.path().join("errores.log"))
        .without_progress();
    let run = DirectoryValidator::new(dir, config).unwrap().run().await.unwrap();

    assert_eq!(run.summary.total, 2);
    assert_eq!(run.summary.valid, 1);
    assert_eq!(run.summary.invalid, 1);
}
