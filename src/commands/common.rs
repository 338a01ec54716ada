//! Arguments, logging, and settings shared by the commands.

use super::config::Config;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use core::time::Duration;
use std::io::{IsTerminal, stderr, stdout};

/// Log target for command orchestration
const LOG_TARGET: &str = "  commands";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Whether colors should be used on stdout.
    #[must_use]
    pub fn for_stdout(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stdout().is_terminal(),
        }
    }

    /// Whether colors should be used on stderr.
    #[must_use]
    pub fn for_stderr(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stderr().is_terminal(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

impl LogLevel {
    /// Initialize the logger for this level; `RUST_LOG` overrides it.
    pub fn init_logging(self) {
        let level = match self {
            Self::None => return,
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        // a second run in the same process keeps the first logger
        let _ = env_logger::Builder::from_env(env)
            .format_module_path(false)
            .format_target(matches!(self, Self::Debug | Self::Trace))
            .try_init();
    }
}

/// Where tables come from and where everything is written
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Directory that the cache, input, and output directories are resolved against
    #[arg(long, default_value = ".", value_name = "PATH")]
    pub project_dir: Utf8PathBuf,

    /// Path to configuration file (default is `csv-wiki.toml` in the project directory)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory where downloaded tables are cached
    #[arg(long, value_name = "PATH", env = "CACHE_DIRECTORY")]
    pub cache_dir: Option<Utf8PathBuf>,

    /// Directory holding hand-maintained input files
    #[arg(long, value_name = "PATH", env = "INPUT_DIRECTORY")]
    pub input_dir: Option<Utf8PathBuf>,

    /// Directory where generated pages are written
    #[arg(long, value_name = "PATH", env = "OUTPUT_DIRECTORY")]
    pub output_dir: Option<Utf8PathBuf>,

    /// URL template tables are downloaded from; `{content}` is replaced by the table name
    #[arg(long, value_name = "URL", env = "GITHUB_CSV_FILE")]
    pub source_url: Option<String>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub cache_dir: Utf8PathBuf,
    pub input_dir: Utf8PathBuf,
    pub output_dir: Utf8PathBuf,
    pub source_url: String,
    pub fetch_timeout: Duration,
}

impl Settings {
    /// Merge the configuration file with command-line and environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the merged values are invalid
    pub fn resolve(args: &CommonArgs) -> Result<Self> {
        let mut config = Config::read(&args.project_dir, args.config.as_ref())?;

        if let Some(dir) = &args.cache_dir {
            config.cache_directory.clone_from(dir);
        }
        if let Some(dir) = &args.input_dir {
            config.input_directory.clone_from(dir);
        }
        if let Some(dir) = &args.output_dir {
            config.output_directory.clone_from(dir);
        }
        if let Some(url) = &args.source_url {
            config.source_url.clone_from(url);
        }

        config.validate()?;

        let settings = Self {
            cache_dir: resolve_dir(&args.project_dir, &config.cache_directory),
            input_dir: resolve_dir(&args.project_dir, &config.input_directory),
            output_dir: resolve_dir(&args.project_dir, &config.output_directory),
            source_url: config.source_url,
            fetch_timeout: config.fetch_timeout,
        };

        log::debug!(target: LOG_TARGET, "Cache directory: {}", settings.cache_dir);
        log::debug!(target: LOG_TARGET, "Input directory: {}", settings.input_dir);
        log::debug!(target: LOG_TARGET, "Output directory: {}", settings.output_dir);
        log::debug!(target: LOG_TARGET, "Source URL: {}", settings.source_url);

        Ok(settings)
    }
}

/// Directories always live under the project directory; a leading separator is dropped.
fn resolve_dir(project_dir: &Utf8Path, dir: &Utf8Path) -> Utf8PathBuf {
    project_dir.join(dir.as_str().trim_start_matches(['/', '\\']))
}
