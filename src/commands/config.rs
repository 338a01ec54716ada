use crate::Result;
use crate::tables::CONTENT_TOKEN;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the project directory
pub const CONFIG_FILE_NAME: &str = "csv-wiki.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the downloaded tables
    #[serde(default = "default_cache_directory")]
    pub cache_directory: Utf8PathBuf,

    /// Directory holding hand-maintained input files
    #[serde(default = "default_input_directory")]
    pub input_directory: Utf8PathBuf,

    /// Directory receiving the generated chunk files
    #[serde(default = "default_output_directory")]
    pub output_directory: Utf8PathBuf,

    /// URL template for table downloads, containing `{content}`
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Upper bound for a single table download
    #[serde(default = "default_fetch_timeout", with = "humantime_serde")]
    pub fetch_timeout: Duration,
}

fn default_cache_directory() -> Utf8PathBuf {
    Utf8PathBuf::from("cache")
}

fn default_input_directory() -> Utf8PathBuf {
    Utf8PathBuf::from("input")
}

fn default_output_directory() -> Utf8PathBuf {
    Utf8PathBuf::from("output")
}

fn default_source_url() -> String {
    "https://raw.githubusercontent.com/xivapi/ffxiv-datamining/master/csv/{content}.csv".to_string()
}

const fn default_fetch_timeout() -> Duration {
    crate::tables::DEFAULT_FETCH_TIMEOUT
}

impl Config {
    /// Load and validate configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid values
    pub fn load(project_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let config = Self::read(project_dir, config_path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a file or use defaults, without validating the values
    ///
    /// Without an explicit path, `csv-wiki.toml` in `project_dir` is used if it exists.
    /// Callers that merge overrides on top validate the merged result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn read(project_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = project_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the source URL has no table placeholder or the timeout is zero
    pub fn validate(&self) -> Result<()> {
        if !self.source_url.contains(CONTENT_TOKEN) {
            return Err(app_err!(
                "source_url must contain {CONTENT_TOKEN} to receive the table name, got '{}'",
                self.source_url
            ));
        }

        if self.fetch_timeout.is_zero() {
            return Err(app_err!("fetch_timeout must be greater than zero"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
