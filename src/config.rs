use crate::storage::{user_config_dir, StoreLocation};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.yml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Widget width in terminal cells.
    pub width: u16,
    pub origin_x: u16,
    pub origin_y: u16,
    pub tick_ms: u64,
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 38,
            origin_x: 2,
            origin_y: 1,
            tick_ms: 1000,
            data_dir: None,
        }
    }
}

impl Config {
    /// Reads `path`, or the per-user `config.yml` when no path is given.
    /// A missing default file means defaults; a missing explicit file is an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match user_config_dir() {
                Some(dir) => (dir.join(CONFIG_FILE), false),
                None => return Ok(Config::default()),
            },
        };
        if !explicit && !path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))?;
        Config::parse(&data).with_context(|| format!("parsing {:?}", path))
    }

    pub fn parse(data: &str) -> Result<Config> {
        if data.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(data)?;
        // Narrower than the grid margins plus seven one-cell columns cannot lay out.
        Ok(Config {
            width: config.width.max(20),
            tick_ms: config.tick_ms.max(50),
            ..config
        })
    }

    /// CLI override first, then the config file's `data_dir`, then the
    /// per-user default.
    pub fn store_location(&self, override_dir: Option<&Path>) -> StoreLocation {
        StoreLocation::resolve(override_dir.or(self.data_dir.as_deref()))
    }
}
