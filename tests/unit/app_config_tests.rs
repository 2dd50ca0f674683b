/*!
 * Tests for app configuration functionality
 */

use anyhow::Result;
use vnscript::app_config::{Config, LogLevel};
use vnscript::errors::AppError;
use crate::common;

/// Test the default configuration values
#[test]
fn test_default_shouldMatchDocumentedValues() {
    let config = Config::default();
    assert_eq!(config.extraction.metadata_prefixes, vec!["game/", "renpy/"]);
    assert!(config.extraction.directive_keywords.iter().any(|k| k == "voice"));
    assert!(!config.extraction.report_skipped);
    assert_eq!(config.limits.max_tokens, 4096);
    assert_eq!(config.concurrent_files, 4);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test writing and reloading a default configuration
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.extraction.directive_keywords, created.extraction.directive_keywords);
    assert_eq!(loaded.limits, created.limits);
    Ok(())
}

/// Test loading a partial configuration
#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"extraction": {"directive_keywords": ["voice", "sfx"]}, "limits": {"requests_per_minute": 0}}"#,
    )?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.extraction.directive_keywords, vec!["voice", "sfx"]);
    assert_eq!(config.limits.requests_per_minute, 0);
    assert_eq!(config.limits.tokens_per_minute, 90_000);
    assert_eq!(config.extraction.parser_options().directive_keywords, vec!["voice", "sfx"]);
    Ok(())
}

/// Test invalid configuration files
#[test]
fn test_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;
    assert!(Config::from_file(&path).is_err());
    Ok(())
}

/// Test validation rules
#[test]
fn test_validate_withBadValues_shouldFail() {
    let mut config = Config::default();
    config.extraction.metadata_prefixes.push(String::new());
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.limits.concurrent_requests = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.extraction.max_file_bytes = 0;
    assert!(config.validate().is_err());
}

/// Test that validation failures are configuration errors
#[test]
fn test_validate_withMultiWordDirective_shouldReturnConfigError() {
    let mut config = Config::default();
    config.extraction.directive_keywords = vec!["play sound".to_string()];

    match config.validate() {
        Err(AppError::Config(message)) => assert!(message.contains("play sound")),
        other => panic!("expected a configuration error, got {:?}", other),
    }
}

/// Test log level conversion
#[test]
fn test_logLevel_intoLevelFilter_shouldMapEachLevel() {
    assert_eq!(log::LevelFilter::from(LogLevel::Error), log::LevelFilter::Error);
    assert_eq!(log::LevelFilter::from(LogLevel::Trace), log::LevelFilter::Trace);
}
