//! Application configuration loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_to_core, CoreError, CoreResult};
use crate::fs::sort::SortField;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "OSEXP_CONFIG";

/// Top-level application configuration.
///
/// All fields have sensible defaults so osexp works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub trash: TrashConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| io_to_core(e, path))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Like [`Config::load`] but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        match Self::load(path) {
            Err(CoreError::NotFound(_)) => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Location of the config file: `$OSEXP_CONFIG`, else
    /// `$HOME/.config/osexp/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        config_path_from(std::env::var(CONFIG_ENV).ok(), std::env::var("HOME").ok())
    }

    /// The configured listing sort field.
    ///
    /// # Errors
    ///
    /// [`CoreError::ConfigParse`] if `general.default_sort` is not a known field.
    pub fn sort_field(&self) -> CoreResult<SortField> {
        self.general.default_sort.parse()
    }
}

fn config_path_from(explicit: Option<String>, home: Option<String>) -> Option<PathBuf> {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    home.filter(|h| !h.is_empty()).map(|h| {
        PathBuf::from(h)
            .join(".config")
            .join("osexp")
            .join("config.toml")
    })
}

/// General browsing preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub show_hidden: bool,
    #[serde(default = "default_sort")]
    pub default_sort: String,
    #[serde(default = "default_true")]
    pub sort_dir_first: bool,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            default_sort: default_sort(),
            sort_dir_first: true,
            date_format: default_date_format(),
        }
    }
}

/// `tree` command settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Deepest level to descend to; unlimited when absent.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

/// Trash settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrashConfig {
    /// Root under which `.trash` lives when `--root` is not given.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_sort() -> String {
    "name".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}
