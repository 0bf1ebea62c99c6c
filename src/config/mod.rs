mod ops;


use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User-tunable settings, stored as TOML next to the installed-app records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where installed apps and their symlinks go.
    pub paths: PathsConfig,
}

/// Fixed system locations used by install and uninstall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory under which each app gets its own subdirectory.
    pub install_root: PathBuf,
    /// Directory on the shell's `PATH` that receives one symlink per app.
    pub bin_dir: PathBuf,
    /// Directory for `.desktop` launchers; `~/.local/share/applications` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launcher_dir: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            install_root: PathBuf::from("/opt"),
            bin_dir: PathBuf::from("/usr/local/bin"),
            launcher_dir: None,
        }
    }
}
