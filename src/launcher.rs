use std::path::PathBuf;

use tracing::info;

use crate::error::{IoContext, Result};
use crate::fs_utils::{chown_if, remove_file_if_exists};
use crate::layout::Layout;
use crate::record::InstalledAppRecord;

/// GNOME desktop entry launching the app through its symlink.
pub fn render(record: &InstalledAppRecord) -> String {
    format!(
        "[Desktop Entry]\n\
         Encoding=UTF-8\n\
         Name={name}\n\
         Exec={exec}\n\
         Icon={exec}\n\
         Type=Application\n\
         Terminal=false\n",
        name = record.app_name,
        exec = record.symlink,
    )
}

/// Write the desktop entry for `record` into the launcher directory.
pub fn write(layout: &Layout, record: &InstalledAppRecord) -> Result<PathBuf> {
    let dir = layout.launcher_dir();
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .io_context("Failed to create launcher directory", dir)?;
        chown_if(dir, layout.owner())?;
    }

    let path = layout.launcher_path(&record.app_name);
    std::fs::write(&path, render(record))
        .io_context("Failed to write desktop file", &path)?;
    chown_if(&path, layout.owner())?;

    info!("Installed desktop entry at {}", path.display());
    Ok(path)
}

/// Delete the launcher for `app_name`; `false` when there was none.
pub fn remove(layout: &Layout, app_name: &str) -> Result<bool> {
    let path = layout.launcher_path(app_name);
    remove_file_if_exists(&path).io_context("Failed to remove desktop file", path)
}
