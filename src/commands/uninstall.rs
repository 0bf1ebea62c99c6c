use anyhow::{Context, Result};
use appimage_installer::installer::UninstallOutcome;
use appimage_installer::Installer;

pub fn cmd_uninstall(installer: &Installer, app_name: &str, force: bool) -> Result<()> {
    match installer
        .uninstall(app_name, force)
        .with_context(|| format!("Failed to uninstall {app_name}"))?
    {
        UninstallOutcome::Removed { restored_to, .. } => {
            eprintln!("App uninstalled, executable restored to {}", restored_to.display());
        }
        UninstallOutcome::NotInstalled => {
            eprintln!("{app_name} does not seem to be installed by appimage-installer");
        }
    }
    Ok(())
}
