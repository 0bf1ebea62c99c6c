use std::path::Path;

use anyhow::{Context, Result};
use appimage_installer::Installer;

pub fn cmd_install(installer: &Installer, app_image: &Path, app_name: &str, force: bool) -> Result<()> {
    let record = installer
        .install(app_image, app_name, force)
        .with_context(|| format!("Failed to install {}", app_image.display()))?;
    eprintln!("Installed {} at {}", record.app_name, record.dest_path);
    println!("{}", record.symlink);
    Ok(())
}
