//! Install self-contained AppImage bundles into a system location, expose them
//! on the shell path and keep a per-user record of what was installed.

/// User-tunable paths, stored as TOML.
pub mod config;
/// Re-running the tool under `sudo`.
pub mod elevate;
/// Error kinds shared by every operation.
pub mod error;
pub(crate) mod fs_utils;
/// The real user behind an invocation, even under `sudo`.
pub mod identity;
/// Install and uninstall orchestration.
pub mod installer;
/// GNOME desktop entries.
pub mod launcher;
/// Fixed filesystem locations.
pub mod layout;
/// The per-app metadata record.
pub mod record;
/// One-file-per-app record store.
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use identity::Identity;
pub use installer::Installer;
pub use layout::Layout;
pub use record::InstalledAppRecord;
pub use store::MetadataStore;
