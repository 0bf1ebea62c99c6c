mod config;
mod install;
mod launcher;
mod list;
mod uninstall;

pub use config::{cmd_config, ConfigAction};
pub use install::cmd_install;
pub use launcher::cmd_launcher;
pub use list::cmd_list;
pub use uninstall::cmd_uninstall;
