use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the metadata store and the installation manager.
#[derive(Debug, Error)]
pub enum Error {
    /// A record, file or directory that an operation needs is absent.
    #[error("{what} not found: {}", path.display())]
    NotFound {
        /// Short description of the missing thing, e.g. `"record for 'myapp'"`.
        what: String,
        /// Location that was looked up.
        path: PathBuf,
    },

    /// The application name is already installed, or its destination
    /// directory already exists.
    #[error("'{name}' is already installed at {}", path.display())]
    AlreadyInstalled {
        /// Application name that collided.
        name: String,
        /// Record file or destination directory that is already present.
        path: PathBuf,
    },

    /// A path this tool wants to create is already occupied.
    #[error("{} already exists", path.display())]
    AlreadyExists {
        /// Occupied path.
        path: PathBuf,
    },

    /// A record file could not be parsed or is missing a field.
    #[error("corrupt record {}: {reason}", path.display())]
    CorruptRecord {
        /// Record file that failed to parse.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// Any other filesystem failure.
    #[error("{context}: {}", path.display())]
    Io {
        /// What was being attempted, e.g. `"Failed to create directory"`.
        context: &'static str,
        /// Path the failing call operated on.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The operation writes outside the user's home and the process is not
    /// elevated.
    #[error("root privileges are required (re-run with sudo or pass --force)")]
    PrivilegeRequired,

    /// The application name cannot be used as a file name.
    #[error("invalid application name '{0}'")]
    InvalidName(String),

    /// The configuration file could not be read, parsed or updated.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Attach a path and a short description to an `io::Error`.
pub(crate) trait IoContext<T> {
    fn io_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            context,
            path: path.into(),
            source,
        })
    }
}

impl Error {
    /// True for the "nothing there" family of errors.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
