use anyhow::{Context, Result};
use appimage_installer::{launcher, Installer};

pub fn cmd_launcher(installer: &Installer, app_name: &str, print: bool) -> Result<()> {
    if print {
        let record = installer.record(app_name)?;
        print!("{}", launcher::render(&record));
        return Ok(());
    }

    let path = installer
        .create_launcher(app_name)
        .with_context(|| format!("Failed to create launcher for {app_name}"))?;
    eprintln!("Created launcher at {}", path.display());
    Ok(())
}
