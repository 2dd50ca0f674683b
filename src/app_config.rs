use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::AppError;
use crate::script::classify::{DEFAULT_DIRECTIVE_KEYWORDS, DEFAULT_METADATA_PREFIXES};
use crate::script::ParserOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Script extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Request limits for translation backends
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Number of script files parsed at the same time
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Script extraction settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Comment prefixes that mark resource paths rather than source text
    #[serde(default = "default_metadata_prefixes")]
    pub metadata_prefixes: Vec<String>,

    /// Cue keywords (voice, video, ...) stepped over when pairing lines
    #[serde(default = "default_directive_keywords")]
    pub directive_keywords: Vec<String>,

    /// Log unmatched `old` lines and tag mismatches as warnings
    #[serde(default)]
    pub report_skipped: bool,

    /// Scripts larger than this are refused
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl ExtractionConfig {
    // @returns: Options for the script parser
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            metadata_prefixes: self.metadata_prefixes.clone(),
            directive_keywords: self.directive_keywords.clone(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            metadata_prefixes: default_metadata_prefixes(),
            directive_keywords: default_directive_keywords(),
            report_skipped: false,
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

/// Request limits applied in front of a translation backend
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LimitsConfig {
    /// Token bucket capacity (0 for no token limit)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u64,

    /// Token refill rate per minute (0 for no refill limit)
    #[serde(default = "default_tokens_per_minute")]
    pub tokens_per_minute: u64,

    /// Requests per minute (0 for no spacing)
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,

    /// Max concurrent requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            tokens_per_minute: default_tokens_per_minute(),
            requests_per_minute: default_requests_per_minute(),
            concurrent_requests: default_concurrent_requests(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_metadata_prefixes() -> Vec<String> {
    DEFAULT_METADATA_PREFIXES.iter().map(|p| p.to_string()).collect()
}

fn default_directive_keywords() -> Vec<String> {
    DEFAULT_DIRECTIVE_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_max_file_bytes() -> u64 {
    32 * 1024 * 1024
}

fn default_max_tokens() -> u64 {
    4096
}

fn default_tokens_per_minute() -> u64 {
    90_000
}

fn default_requests_per_minute() -> u32 {
    60
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_concurrent_files() -> usize {
    4
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load a configuration file, writing the defaults there first if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        let config = Self::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.concurrent_files == 0 {
            return Err(AppError::Config("concurrent_files must be at least 1".to_string()));
        }

        if self.limits.concurrent_requests == 0 {
            return Err(AppError::Config("limits.concurrent_requests must be at least 1".to_string()));
        }

        if self.extraction.max_file_bytes == 0 {
            return Err(AppError::Config("extraction.max_file_bytes must be greater than 0".to_string()));
        }

        if self.extraction.metadata_prefixes.iter().any(|p| p.is_empty()) {
            return Err(AppError::Config(
                "Empty metadata prefix would disqualify every comment".to_string(),
            ));
        }

        if let Some(keyword) = self
            .extraction
            .directive_keywords
            .iter()
            .find(|k| k.is_empty() || k.chars().any(char::is_whitespace))
        {
            return Err(AppError::Config(format!(
                "Directive keyword must be a single word, got {:?}",
                keyword
            )));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            extraction: ExtractionConfig::default(),
            limits: LimitsConfig::default(),
            concurrent_files: default_concurrent_files(),
            log_level: LogLevel::default(),
        }
    }
}
