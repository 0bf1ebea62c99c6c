use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{Error, IoContext, Result};
use crate::fs_utils::chown_if;
use crate::identity::Owner;

impl Config {
    /// Location of the config file for a user whose home is `home`.
    pub fn path(home: &Path) -> PathBuf {
        home.join(".appImageInstaller").join("config.toml")
    }

    /// Load the config at `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .io_context("Failed to read config", path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Write the config to `path`, handing the file to `owner` when given.
    pub fn save(&self, path: &Path, owner: Option<Owner>) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .io_context("Failed to create config dir", parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, content)
            .io_context("Failed to write config", path)?;
        chown_if(path, owner)
    }

    /// Get a config value by dot-separated key path
    pub fn get_value(&self, key: &str) -> Result<String> {
        match key {
            "paths.install_root" => Ok(self.paths.install_root.display().to_string()),
            "paths.bin_dir" => Ok(self.paths.bin_dir.display().to_string()),
            "paths.launcher_dir" => Ok(self
                .paths
                .launcher_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            _ => Err(Error::Config(format!("unknown config key: {key}"))),
        }
    }

    /// Set a config value by dot-separated key path
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "paths.install_root" => self.paths.install_root = absolute(key, value)?,
            "paths.bin_dir" => self.paths.bin_dir = absolute(key, value)?,
            "paths.launcher_dir" => {
                self.paths.launcher_dir = if value.is_empty() {
                    None
                } else {
                    Some(absolute(key, value)?)
                };
            }
            _ => return Err(Error::Config(format!("unknown config key: {key}"))),
        }
        Ok(())
    }
}

fn absolute(key: &str, value: &str) -> Result<PathBuf> {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        Ok(path)
    } else {
        Err(Error::Config(format!("{key} must be an absolute path, got '{value}'")))
    }
}
