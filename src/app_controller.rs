use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::cache::{CacheFile, TokenCounter, TranslationStatus};
use crate::file_utils::FileManager;
use crate::script::{apply_translations, ScriptDocument, ScriptParser};
use crate::translation::{DispatchSummary, Dispatcher, RequestLimiter, Translator};

// @module: Application controller for script extraction and translation

// @const: Encoding name recorded for decoded scripts
const SCRIPT_ENCODING: &str = "utf-8";

/// One parsed script: its decoded lines and the records extracted from it
#[derive(Debug, Clone)]
pub struct ExtractedScript {
    /// Path the script was read from
    pub path: PathBuf,

    /// Decoded lines
    pub document: ScriptDocument,

    /// Extracted records
    pub cache: CacheFile,
}

/// Totals of a translate run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateReport {
    pub files_written: usize,
    pub files_skipped: usize,
    pub dispatch: DispatchSummary,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Parser shared by all file workers
    parser: Arc<ScriptParser>,

    // @field: Token memo shared by all records
    counter: TokenCounter,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let parser = Arc::new(ScriptParser::new(config.extraction.parser_options()));
        Ok(Self {
            config,
            parser,
            counter: TokenCounter::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn token_counter(&self) -> &TokenCounter {
        &self.counter
    }

    /// Parse one script or every script under a directory.
    ///
    /// Files are parsed in parallel and returned in path order. In directory
    /// mode a file that cannot be read is logged and left out.
    pub async fn extract(&self, input: &Path) -> Result<Vec<ExtractedScript>> {
        let paths = FileManager::collect_scripts(input)?;
        let root = if FileManager::dir_exists(input) {
            input.to_path_buf()
        } else {
            input.parent().unwrap_or(Path::new("")).to_path_buf()
        };
        let single_file = FileManager::file_exists(input);

        info!("Extracting {} script file(s) from {:?}", paths.len(), input);

        let results = stream::iter(paths)
            .map(|path| {
                let parser = self.parser.clone();
                let storage_path = FileManager::storage_path(&root, &path);
                let max_bytes = self.config.extraction.max_file_bytes;
                let report_skipped = self.config.extraction.report_skipped;

                async move {
                    let task_path = path.clone();
                    let joined = tokio::task::spawn_blocking(move || {
                        parse_script(&parser, task_path, &storage_path, max_bytes, report_skipped)
                    })
                    .await;
                    match joined {
                        Ok(result) => result,
                        Err(e) => Err(anyhow!("Parser task for {:?} failed: {}", path, e)),
                    }
                }
            })
            .buffered(self.config.concurrent_files)
            .collect::<Vec<_>>()
            .await;

        let mut scripts = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(script) => scripts.push(script),
                Err(e) if single_file => return Err(e),
                Err(e) => error!("Skipping file: {:#}", e),
            }
        }

        let total: usize = scripts.iter().map(|s| s.cache.len()).sum();
        info!("Extracted {} entries from {} file(s)", total, scripts.len());
        Ok(scripts)
    }

    /// Extract, translate with `translator`, and write rewritten scripts
    /// under `output_dir` (mirroring the input layout).
    pub async fn translate(
        &self,
        input: &Path,
        translator: Arc<dyn Translator>,
        output_dir: &Path,
        force_overwrite: bool,
    ) -> Result<TranslateReport> {
        let scripts = self.extract(input).await?;
        FileManager::ensure_dir(output_dir)?;

        let limits = &self.config.limits;
        let limiter = if translator.is_rate_limited() {
            RequestLimiter::new(limits.max_tokens, limits.tokens_per_minute, limits.requests_per_minute)
        } else {
            debug!("Translator {} runs without request limits", translator.name());
            RequestLimiter::unlimited()
        };
        let limiter = Arc::new(limiter);
        let dispatcher = Dispatcher::new(
            translator,
            limiter,
            self.counter.clone(),
            limits.concurrent_requests,
        );

        let total_items: usize = scripts.iter().map(|s| s.cache.len()).sum();
        let progress_bar = ProgressBar::new(total_items as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut report = TranslateReport::default();
        for script in &scripts {
            let output_path = output_dir.join(&script.cache.storage_path);
            if output_path.exists() && !force_overwrite {
                warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_path);
                report.files_skipped += 1;
                progress_bar.inc(script.cache.len() as u64);
                continue;
            }

            let bar = progress_bar.clone();
            let summary = dispatcher.run(&script.cache.items, move |_, _| bar.inc(1)).await;
            accumulate(&mut report.dispatch, summary);

            let lines = apply_translations(&script.document.lines, script.cache.rewrites())
                .with_context(|| format!("Failed to rewrite {:?}", script.path))?;
            FileManager::write_to_file(&output_path, &script.document.render(&lines))?;
            report.files_written += 1;

            debug!(
                "{}: {} of {} entries translated",
                script.cache.storage_path,
                script.cache.count_status(TranslationStatus::Translated),
                script.cache.len()
            );
        }
        progress_bar.finish_and_clear();

        info!(
            "Translated {} entries ({} without translation, {} failed) into {} file(s)",
            report.dispatch.translated,
            report.dispatch.not_found,
            report.dispatch.failed,
            report.files_written
        );
        Ok(report)
    }
}

fn accumulate(total: &mut DispatchSummary, summary: DispatchSummary) {
    total.translated += summary.translated;
    total.not_found += summary.not_found;
    total.failed += summary.failed;
    total.skipped += summary.skipped;
}

// Runs on a blocking worker: read, split, parse, wrap
fn parse_script(
    parser: &ScriptParser,
    path: PathBuf,
    storage_path: &str,
    max_bytes: u64,
    report_skipped: bool,
) -> Result<ExtractedScript> {
    let text = FileManager::read_script(&path, max_bytes)?;
    let document = ScriptDocument::from_text(&text, SCRIPT_ENCODING);

    let entries = if report_skipped {
        parser.parse_with_diagnostics(&document.lines, |diagnostic| {
            warn!("{}: {}", storage_path, diagnostic);
        })
    } else {
        parser.parse(&document.lines)
    };
    debug!("{}: {} lines, {} entries", storage_path, document.len(), entries.len());

    let cache = CacheFile::from_entries(storage_path, &document.encoding, entries);
    Ok(ExtractedScript { path, document, cache })
}
