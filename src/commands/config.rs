use anyhow::Result;
use appimage_installer::{config::Config, Identity};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration to disk
    Init,
    /// Set a configuration value (e.g. paths.install_root /opt)
    Set { key: String, value: String },
    /// Get a configuration value
    Get { key: String },
}

pub fn cmd_config(identity: &Identity, action: ConfigAction) -> Result<()> {
    let path = Config::path(&identity.home);
    match action {
        ConfigAction::Show => {
            let config = Config::load(&path)?;
            let pretty = toml::to_string_pretty(&config)?;
            print!("{pretty}");
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let config = Config::default();
            config.save(&path, identity.owner())?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(&path)?;
            config.set_value(&key, &value)?;
            config.save(&path, identity.owner())?;
            println!("Set {key} = {value}");
        }
        ConfigAction::Get { key } => {
            let config = Config::load(&path)?;
            println!("{}", config.get_value(&key)?);
        }
    }
    Ok(())
}
