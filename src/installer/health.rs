use std::fmt;
use std::fs;
use std::path::Path;

use crate::record::InstalledAppRecord;

/// On-disk state of an installed app compared to its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Health {
    /// Executable present, symlink points at it.
    Healthy,
    /// The relocated executable is gone.
    MissingExecutable,
    /// Nothing at the symlink path.
    MissingSymlink,
    /// The symlink path exists but does not point at the executable.
    SymlinkMismatch,
}

impl Health {
    /// Inspect the executable and symlink named by `record`.
    pub fn check(record: &InstalledAppRecord) -> Self {
        let executable = record.executable();
        if !executable.is_file() {
            return Self::MissingExecutable;
        }
        match fs::read_link(Path::new(&record.symlink)) {
            Ok(target) if target == executable => Self::Healthy,
            Ok(_) => Self::SymlinkMismatch,
            Err(_) if Path::new(&record.symlink).exists() => Self::SymlinkMismatch,
            Err(_) => Self::MissingSymlink,
        }
    }

    /// True only for [`Health::Healthy`].
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "ok"),
            Self::MissingExecutable => write!(f, "executable missing"),
            Self::MissingSymlink => write!(f, "symlink missing"),
            Self::SymlinkMismatch => write!(f, "symlink points elsewhere"),
        }
    }
}
