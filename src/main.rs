//! Command-line entry point for `appimage-installer`.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use appimage_installer::{elevate, Config, Error, Identity, Installer, Layout};
use commands::ConfigAction;

#[derive(Parser)]
#[command(
    name = "appimage-installer",
    version,
    about = "Install AppImage bundles system-wide and manage their launchers"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install new app
    Install {
        /// Path to the AppImage file
        app_image: PathBuf,
        /// Name used for the install directory, the symlink and the record
        app_name: String,
        /// Disable root privileges check
        #[arg(short, long)]
        force: bool,
    },

    /// Uninstall existing app
    Uninstall {
        /// Name the app was installed under
        app_name: String,
        /// Disable root privileges check
        #[arg(short, long)]
        force: bool,
    },

    /// List installed apps
    List,

    /// Create Gnome desktop launcher
    Launcher {
        /// Name the app was installed under
        app_name: String,
        /// Print the desktop entry instead of writing it
        #[arg(long)]
        print: bool,
    },

    /// Manage appimage-installer configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let identity = Identity::detect()?;
    let result = match cli.command {
        Commands::Install { app_image, app_name, force } => installer(&identity)
            .and_then(|installer| commands::cmd_install(&installer, &app_image, &app_name, force)),
        Commands::Uninstall { app_name, force } => installer(&identity)
            .and_then(|installer| commands::cmd_uninstall(&installer, &app_name, force)),
        Commands::List => installer(&identity).and_then(|installer| commands::cmd_list(&installer)),
        Commands::Launcher { app_name, print } => installer(&identity)
            .and_then(|installer| commands::cmd_launcher(&installer, &app_name, print)),
        Commands::Config { action } => commands::cmd_config(&identity, action),
    };

    match result {
        Err(e) if matches!(e.downcast_ref::<Error>(), Some(Error::PrivilegeRequired)) => {
            eprintln!("We need root privileges. Sudoing command...");
            elevate::reexec_with_sudo()
        }
        other => other,
    }
}

/// Installer for the configured layout, with the record store ready.
fn installer(identity: &Identity) -> Result<Installer> {
    let config = Config::load(&Config::path(&identity.home))?;
    let installer = Installer::new(Layout::new(identity, &config), identity.elevated);
    installer.store().ensure_ready()?;
    Ok(installer)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var("APPIMAGE_INSTALLER_LOG")
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["appimage-installer", "config", "get", "paths.bin_dir"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { action: ConfigAction::Get { .. } }));

        let cli = Cli::try_parse_from(["appimage-installer", "-v", "uninstall", "myapp", "-f"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Commands::Uninstall { force: true, .. }));
    }
}
