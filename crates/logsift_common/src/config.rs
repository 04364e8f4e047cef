//! Logsift configuration
//!
//! Config file: ~/.config/logsift/config.toml or /etc/logsift/config.toml,
//! or whatever `--config` / `LOGSIFT_CONFIG` names. Every key is optional.

use crate::analyzer::DEFAULT_TOP_ERRORS;
use crate::error::{LogsiftError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "LOGSIFT_CONFIG";

/// When to color the text report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when stdout is a terminal that supports it
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Cap on the ranked error list
    pub top_errors: usize,

    /// Input used when `--input` is not given
    pub default_input: Option<PathBuf>,

    /// Reader chunk size in KiB
    pub read_buffer_kb: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_errors: DEFAULT_TOP_ERRORS,
            default_input: None,
            read_buffer_kb: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Load at most this many lines; 0 loads the whole file
    pub max_entries: usize,

    /// Rows per page until the terminal size is known
    pub page_size: usize,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            max_entries: 0,
            page_size: 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: ColorMode,
}

/// Main logsift configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogsiftConfig {
    pub analysis: AnalysisConfig,
    pub tui: TuiConfig,
    pub output: OutputConfig,
}

impl LogsiftConfig {
    /// `$XDG_CONFIG_HOME/logsift/config.toml`, if a config dir is known
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("logsift").join("config.toml"))
    }

    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/logsift/config.toml")
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. `explicit` path (the `--config` flag)
    /// 2. `$LOGSIFT_CONFIG`
    /// 3. User config
    /// 4. System config
    /// 5. Defaults
    ///
    /// A named file must exist and parse; the implicit locations are skipped
    /// when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }

        let implicit = Self::user_config_path()
            .into_iter()
            .chain(std::iter::once(Self::system_config_path()));
        for path in implicit {
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| LogsiftError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml(&contents, path)?;
        if config.analysis.read_buffer_kb == 0 {
            warn!(path = %path.display(), "read_buffer_kb = 0, using 1 KiB");
        }
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse TOML text; `origin` is only used for error messages
    pub fn from_toml(contents: &str, origin: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| LogsiftError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reader chunk size in bytes, never zero
    pub fn read_buffer_bytes(&self) -> usize {
        self.analysis.read_buffer_kb.max(1) * 1024
    }

    /// Line limit for the TUI, `None` meaning the whole file
    pub fn tui_limit(&self) -> Option<usize> {
        (self.tui.max_entries > 0).then_some(self.tui.max_entries)
    }
}
