use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) const DB_ENV: &str = "CASHBOOK_DB";
const CONFIG_FILE: &str = "config.json";
const DB_FILE: &str = "cashbook.db";
const LOG_FILE: &str = "cashbook.log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) db_path: Option<PathBuf>,
    pub(crate) currency_symbol: String,
    pub(crate) log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            currency_symbol: "$".into(),
            log_filter: "info".into(),
        }
    }
}

impl Config {
    /// Read `path`, falling back to defaults when the file does not exist.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}

/// Platform directories for config, database and log files.
pub(crate) struct AppDirs {
    pub(crate) config_dir: PathBuf,
    pub(crate) data_dir: PathBuf,
}

impl AppDirs {
    pub(crate) fn discover() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "cashbook", "Cashbook")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(Self {
            config_dir: proj_dirs.config_dir().to_path_buf(),
            data_dir: proj_dirs.data_dir().to_path_buf(),
        })
    }

    pub(crate) fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub(crate) fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    pub(crate) fn ensure_data_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })
    }
}

/// Database location: the environment override wins, then the config file,
/// then the default file in the data directory.
pub(crate) fn resolve_db_path(
    config: &Config,
    env_override: Option<String>,
    data_dir: &Path,
) -> PathBuf {
    env_override
        .filter(|p| !p.trim().is_empty())
        .map(|p| PathBuf::from(crate::run::shellexpand(&p)))
        .or_else(|| config.db_path.clone())
        .unwrap_or_else(|| data_dir.join(DB_FILE))
}
