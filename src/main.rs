// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use vnscript::app_config::{self, Config};
use vnscript::cache::CacheFile;
use vnscript::file_utils::FileManager;
use vnscript::translation::Dictionary;
use vnscript::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract translatable entries from a script or a directory of scripts
    Extract {
        /// Script file or directory to scan
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Write the entries as JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fill scripts from a JSON dictionary and write the rewritten copies
    Translate {
        /// Script file or directory to translate
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// JSON object mapping source text to translation
        #[arg(short, long)]
        dictionary: PathBuf,

        /// Output directory (defaults to a `-translated` sibling of the input)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Generate shell completions for vnscript
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// vnscript - translation extraction for visual-novel scripts
#[derive(Parser, Debug)]
#[command(name = "vnscript")]
#[command(version)]
#[command(about = "Extract and refill translatable text in visual-novel scripts")]
#[command(long_about = "vnscript finds translatable dialogue in Ren'Py translation scripts
(old/new tables, tagged and untagged comment pairs) and rewrites only the
lines that carry the in-game text.

EXAMPLES:
    vnscript extract game/tl/french                     # Print entries as JSON
    vnscript extract script.rpy -o entries.json         # Save entries to a file
    vnscript translate game/tl/french -d dict.json -f   # Fill from a dictionary
    vnscript completions bash > vnscript.bash           # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and label for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, label) = Self::style_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, label, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything here; the effective level is set once config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "vnscript", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.into());

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Extract { input_path, output } => run_extract(&controller, &input_path, output.as_deref()).await,
        Commands::Translate { input_path, dictionary, output_dir, force_overwrite } => {
            let output_dir = output_dir.unwrap_or_else(|| default_output_dir(&input_path));
            run_translate(&controller, &input_path, &dictionary, &output_dir, force_overwrite).await
        }
        Commands::Completions { .. } => Ok(()),
    }
}

async fn run_extract(controller: &Controller, input_path: &Path, output: Option<&Path>) -> Result<()> {
    let scripts = controller.extract(input_path).await?;
    let files: Vec<CacheFile> = scripts.into_iter().map(|script| script.cache).collect();
    let json = CacheFile::to_json(&files)?;

    match output {
        Some(path) => {
            FileManager::write_to_file(path, &json)?;
            info!("Success: {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout();
            writeln!(stdout, "{}", json).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

async fn run_translate(
    controller: &Controller,
    input_path: &Path,
    dictionary_path: &Path,
    output_dir: &Path,
    force_overwrite: bool,
) -> Result<()> {
    if output_dir == input_path {
        return Err(anyhow!("Output directory must differ from the input: {:?}", output_dir));
    }

    let dictionary = Dictionary::from_file(dictionary_path)?;
    let report = controller
        .translate(input_path, Arc::new(dictionary), output_dir, force_overwrite)
        .await?;

    info!(
        "Success: {} file(s) written to {:?}, {} skipped",
        report.files_written, output_dir, report.files_skipped
    );
    Ok(())
}

// @returns: `<dir>-translated` next to a directory, `translated/` next to a file
fn default_output_dir(input_path: &Path) -> PathBuf {
    if input_path.is_dir() {
        let name = input_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "scripts".to_string());
        input_path.with_file_name(format!("{}-translated", name))
    } else {
        input_path.parent().unwrap_or(Path::new(".")).join("translated")
    }
}
