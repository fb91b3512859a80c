use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::report::CSV_FILENAME;

const CONFIG_DIR: &str = ".dice-score";
const CONFIG_FILE: &str = "config.toml";

/// Optional settings loaded from `~/.dice-score/config.toml` or `--config`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiceConfig {
    pub output_dir: Option<Utf8PathBuf>,
    pub csv_filename: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSource {
    Explicit,
    HomeDefault,
    Builtin,
}

impl ConfigSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigSource::Explicit => "explicit",
            ConfigSource::HomeDefault => "home-default",
            ConfigSource::Builtin => "builtin",
        }
    }
}

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: DiceConfig,
    pub path: Option<Utf8PathBuf>,
    pub source: ConfigSource,
}

impl DiceConfig {
    /// Output directory: CLI flag, then config, then the system temp dir.
    pub fn output_dir(&self, flag: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
        if let Some(dir) = flag {
            return Ok(dir.to_owned());
        }
        if let Some(dir) = &self.output_dir {
            return Ok(dir.clone());
        }
        to_utf8(std::env::temp_dir())
    }

    pub fn csv_filename(&self) -> Result<&str> {
        let name = self.csv_filename.as_deref().unwrap_or(CSV_FILENAME);
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            bail!("csv_filename `{}` must be a bare file name", name);
        }
        Ok(name)
    }
}

/// Load a configuration file from disk and deserialize it.
pub fn load_from_path(path: &Utf8Path) -> Result<DiceConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path))
}

/// Resolve and load the effective configuration.
pub fn resolve(explicit: Option<&Path>) -> Result<LoadedConfig> {
    resolve_with_home(explicit, dirs::home_dir())
}

fn resolve_with_home(explicit: Option<&Path>, home: Option<PathBuf>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let path = to_utf8(path.to_path_buf())?;
        if !path.is_file() {
            bail!("config file {} does not exist", path);
        }
        return Ok(LoadedConfig {
            config: load_from_path(&path)?,
            path: Some(path),
            source: ConfigSource::Explicit,
        });
    }

    if let Some(path) = home_config_path(home)? {
        if path.is_file() {
            return Ok(LoadedConfig {
                config: load_from_path(&path)?,
                path: Some(path),
                source: ConfigSource::HomeDefault,
            });
        }
    }

    Ok(LoadedConfig {
        config: DiceConfig::default(),
        path: None,
        source: ConfigSource::Builtin,
    })
}

fn home_config_path(home: Option<PathBuf>) -> Result<Option<Utf8PathBuf>> {
    let Some(home) = home else {
        return Ok(None);
    };
    let home = to_utf8(home)?;
    Ok(Some(home.join(CONFIG_DIR).join(CONFIG_FILE)))
}

pub fn to_utf8(path: PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|path| anyhow!("path {} is not valid UTF-8", path.display()))
}
