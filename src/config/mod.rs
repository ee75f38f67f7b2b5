use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::layout::LayoutGeometry;
use crate::utils::date::validate_date_format;

const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "schedule.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Falls back to `<data dir>/schedule.db` when unset
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default = "default_actor_name")]
    pub actor_name: String,
    /// chrono format used for history values
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub geometry: LayoutGeometry,
}

fn default_actor_name() -> String {
    "unknown".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            actor_name: default_actor_name(),
            date_format: default_date_format(),
            geometry: LayoutGeometry::default(),
        }
    }
}

impl AppConfig {
    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate().with_context(|| format!("Invalid config file {:?}", path))?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_date_format(&self.date_format).map_err(|e| anyhow!(e))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
    }

    pub fn resolved_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(DATABASE_FILE)),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "week-scheduler", "week-scheduler")
        .context("Could not determine config directory")
}
