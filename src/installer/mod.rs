mod health;
mod rollback;


use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, IoContext, Result};
use crate::fs_utils::{add_exec_bit, chown_if, move_file, occupied};
use crate::launcher;
use crate::layout::Layout;
use crate::record::{validate_app_name, InstalledAppRecord};
use crate::store::MetadataStore;

pub use health::Health;
use rollback::Rollback;

/// Result of [`Installer::uninstall`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallOutcome {
    /// The app was removed and its executable moved to `restored_to`.
    Removed {
        /// Record that was deleted.
        record: InstalledAppRecord,
        /// New location of the executable.
        restored_to: PathBuf,
    },
    /// No record exists for the name; nothing was touched.
    NotInstalled,
}

/// An installed app together with the state of its files on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledApp {
    /// Stored record.
    pub record: InstalledAppRecord,
    /// Whether the executable and symlink are where the record says.
    pub health: Health,
}

/// Everything `list` reports.
#[derive(Debug, Default)]
pub struct Inventory {
    /// Readable records, sorted by name.
    pub apps: Vec<InstalledApp>,
    /// Record files that could not be parsed.
    pub problems: Vec<(String, Error)>,
}

/// Orchestrates install and uninstall against one [`Layout`].
#[derive(Debug, Clone)]
pub struct Installer {
    layout: Layout,
    store: MetadataStore,
    elevated: bool,
}

impl Installer {
    /// Installer acting on `layout`; `elevated` says whether the process runs as root.
    pub fn new(layout: Layout, elevated: bool) -> Self {
        let store = MetadataStore::new(layout.apps_dir(), layout.owner());
        Self { layout, store, elevated }
    }

    /// Paths this installer works with.
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Backing record store.
    pub const fn store(&self) -> &MetadataStore {
        &self.store
    }

    fn check_privileges(&self, force: bool) -> Result<()> {
        if self.elevated || force {
            Ok(())
        } else {
            Err(Error::PrivilegeRequired)
        }
    }

    /// Move `app_image` into its own directory under the install root, make it
    /// executable, link it onto the path and record it.
    ///
    /// A failure after the destination directory exists undoes the completed
    /// steps in reverse order before the error is returned.
    pub fn install(&self, app_image: &Path, app_name: &str, force: bool) -> Result<InstalledAppRecord> {
        validate_app_name(app_name)?;
        self.check_privileges(force)?;

        match fs::metadata(app_image) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(Error::NotFound {
                    what: "app image file".into(),
                    path: app_image.to_path_buf(),
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound {
                    what: "app image".into(),
                    path: app_image.to_path_buf(),
                })
            }
            Err(e) => return Err(e).io_context("Failed to stat app image", app_image),
        }

        if self.store.contains(app_name)? {
            return Err(Error::AlreadyInstalled {
                name: app_name.to_string(),
                path: self.store.dir().join(app_name),
            });
        }

        let file_name = app_image
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::InvalidName(app_image.display().to_string()))?
            .to_string();
        let dest_path = self.layout.dest_path(app_name);
        let dest_file = dest_path.join(&file_name);
        let symlink = self.layout.symlink_path(app_name);
        debug!(
            dest = %dest_file.display(),
            symlink = %symlink.display(),
            "computed install paths"
        );

        match fs::create_dir(&dest_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(Error::AlreadyInstalled {
                    name: app_name.to_string(),
                    path: dest_path,
                })
            }
            Err(e) => return Err(e).io_context("Failed to create directory", dest_path),
        }

        let mut rollback = Rollback::default();
        rollback.created_dir(dest_path.clone());

        let record = InstalledAppRecord {
            app_name: app_name.to_string(),
            dest_path: dest_path.display().to_string(),
            app_file_path: file_name,
            symlink: symlink.display().to_string(),
        };

        match self.finish_install(app_image, &dest_file, &symlink, &record, &mut rollback) {
            Ok(()) => {
                info!("Installed {app_name} -> {}", dest_file.display());
                Ok(record)
            }
            Err(e) => {
                warn!("install of {app_name} failed, rolling back: {e}");
                rollback.unwind();
                Err(e)
            }
        }
    }

    fn finish_install(
        &self,
        app_image: &Path,
        dest_file: &Path,
        symlink: &Path,
        record: &InstalledAppRecord,
        rollback: &mut Rollback,
    ) -> Result<()> {
        info!("Moving {} to {}", app_image.display(), dest_file.display());
        move_file(app_image, dest_file)?;
        rollback.moved(app_image.to_path_buf(), dest_file.to_path_buf());

        let mode = fs::metadata(dest_file)
            .io_context("Failed to stat file", dest_file)?
            .permissions()
            .mode();
        add_exec_bit(dest_file)?;
        rollback.changed_mode(dest_file.to_path_buf(), mode);

        info!("Creating symlink {}", symlink.display());
        if occupied(symlink) {
            return Err(Error::AlreadyExists { path: symlink.to_path_buf() });
        }
        match std::os::unix::fs::symlink(dest_file, symlink) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(Error::AlreadyExists { path: symlink.to_path_buf() })
            }
            Err(e) => return Err(e).io_context("Failed to create symlink", symlink),
        }
        rollback.linked(symlink.to_path_buf());

        self.store.put(record)?;
        Ok(())
    }

    /// Reverse a previous install: move the executable back to the user's
    /// home, remove the symlink, the install directory, any launcher and the
    /// record. A name without a record is a no-op.
    pub fn uninstall(&self, app_name: &str, force: bool) -> Result<UninstallOutcome> {
        validate_app_name(app_name)?;
        self.check_privileges(force)?;

        let record = match self.store.get(app_name) {
            Ok(record) => record,
            Err(e) if e.is_not_found() => {
                info!("{app_name} does not seem to be installed by appimage-installer");
                return Ok(UninstallOutcome::NotInstalled);
            }
            Err(e) => return Err(e),
        };

        if validate_app_name(&record.app_file_path).is_err() {
            return Err(Error::CorruptRecord {
                path: self.store.dir().join(app_name),
                reason: format!("app_file_path '{}' is not a plain file name", record.app_file_path),
            });
        }

        let expected_dest = self.layout.dest_path(app_name);
        let expected_symlink = self.layout.symlink_path(app_name);
        if Path::new(&record.dest_path) != expected_dest
            || Path::new(&record.symlink) != expected_symlink
        {
            return Err(Error::CorruptRecord {
                path: self.store.dir().join(app_name),
                reason: format!(
                    "expected dest_path {} and symlink {}, found {} and {}",
                    expected_dest.display(),
                    expected_symlink.display(),
                    record.dest_path,
                    record.symlink
                ),
            });
        }

        let executable = record.executable();
        let restored_to = self.layout.restore_path(&record.app_file_path);
        if occupied(&restored_to) {
            return Err(Error::AlreadyExists { path: restored_to });
        }

        info!("Restoring {} to {}", executable.display(), restored_to.display());
        move_file(&executable, &restored_to)?;
        chown_if(&restored_to, self.layout.owner())?;

        info!("Removing symlink {}", record.symlink);
        let symlink = Path::new(&record.symlink);
        match fs::remove_file(symlink) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound {
                    what: "symlink".into(),
                    path: symlink.to_path_buf(),
                })
            }
            Err(e) => return Err(e).io_context("Failed to remove symlink", symlink),
        }

        info!("Removing app directory {}", record.dest_path);
        fs::remove_dir(&record.dest_path)
            .io_context("Failed to remove app directory", &record.dest_path)?;

        match launcher::remove(&self.layout, app_name) {
            Ok(true) => info!("Removed launcher for {app_name}"),
            Ok(false) => {}
            Err(e) => warn!("could not remove launcher: {e}"),
        }

        info!("Removing record for {app_name}");
        self.store.delete(app_name)?;

        Ok(UninstallOutcome::Removed { record, restored_to })
    }

    /// Every stored record with its on-disk health, plus unreadable entries.
    pub fn list_installed(&self) -> Result<Inventory> {
        let listing = self.store.list_all()?;
        let apps = listing
            .records
            .into_iter()
            .map(|(_, record)| {
                let health = Health::check(&record);
                InstalledApp { record, health }
            })
            .collect();
        Ok(Inventory { apps, problems: listing.problems })
    }

    /// Stored record for `app_name`.
    pub fn record(&self, app_name: &str) -> Result<InstalledAppRecord> {
        self.store.get(app_name)
    }

    /// Write a desktop launcher for an installed app and return its path.
    pub fn create_launcher(&self, app_name: &str) -> Result<PathBuf> {
        let record = self.store.get(app_name)?;
        launcher::write(&self.layout, &record)
    }
}
