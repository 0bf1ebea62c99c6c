use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Persisted description of one installed app image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledAppRecord {
    /// Unique key; also the record's file name and the launcher name.
    pub app_name: String,
    /// Directory created to hold the relocated executable.
    pub dest_path: String,
    /// Base name of the executable, relative to `dest_path`.
    pub app_file_path: String,
    /// Path-visible symlink pointing at the executable.
    pub symlink: String,
}

impl InstalledAppRecord {
    /// Absolute path of the relocated executable.
    pub fn executable(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.dest_path).join(&self.app_file_path)
    }
}

/// Reject names that cannot safely be used as a single path component.
pub fn validate_app_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\0']) {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(())
}
