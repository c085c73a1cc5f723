//! Server configuration.
//!
//! Settings come from an optional TOML file. The path is taken from the
//! `SPIELBERICHT_CONFIG` environment variable and falls back to
//! `./spielbericht.toml`. Every field has a default, so running without any file
//! gives a working local setup (LibreOffice and poppler's `pdfunite` on `PATH`).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_ENV: &str = "SPIELBERICHT_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "spielbericht.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Spielbericht template used when an upload does not bring its own.
    pub template_path: PathBuf,
    pub static_dir: PathBuf,
    /// Parent directory for per-batch scratch directories.
    pub work_dir: PathBuf,
    pub converter_program: String,
    pub merge_program: String,
    pub conversion_timeout_secs: u64,
    pub merge_timeout_secs: u64,
    pub fonts_dir: PathBuf,
    pub font_family: String,
    pub max_upload_bytes: usize,
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            template_path: PathBuf::from("./templates/spielbericht.xlsx"),
            static_dir: PathBuf::from("./static"),
            work_dir: std::env::temp_dir(),
            converter_program: "soffice".to_string(),
            merge_program: "pdfunite".to_string(),
            conversion_timeout_secs: 30,
            merge_timeout_secs: 60,
            fonts_dir: PathBuf::from("./fonts"),
            font_family: "LiberationSans".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            open_browser: false,
        }
    }
}

impl Config {
    /// Loads the configuration from `$SPIELBERICHT_CONFIG` or `./spielbericht.toml`.
    ///
    /// A missing file yields the defaults. A file that exists but cannot be read
    /// or parsed is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn conversion_timeout(&self) -> Duration {
        Duration::from_secs(self.conversion_timeout_secs)
    }

    pub fn merge_timeout(&self) -> Duration {
        Duration::from_secs(self.merge_timeout_secs)
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
