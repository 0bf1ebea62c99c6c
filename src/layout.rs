use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::identity::{Identity, Owner};

/// Every path the installer reads or writes, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    home: PathBuf,
    install_root: PathBuf,
    bin_dir: PathBuf,
    launcher_dir: PathBuf,
    owner: Option<Owner>,
}

impl Layout {
    /// Build the layout for `identity` using the paths from `config`.
    pub fn new(identity: &Identity, config: &Config) -> Self {
        let launcher_dir = config.paths.launcher_dir.clone().unwrap_or_else(|| {
            identity.home.join(".local").join("share").join("applications")
        });
        Self {
            home: identity.home.clone(),
            install_root: config.paths.install_root.clone(),
            bin_dir: config.paths.bin_dir.clone(),
            launcher_dir,
            owner: identity.owner(),
        }
    }

    /// Real user's home directory; uninstalled apps are moved back here.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Owner for files created in the user's home, set only when elevated.
    pub const fn owner(&self) -> Option<Owner> {
        self.owner
    }

    /// `~/.appImageInstaller`
    pub fn state_dir(&self) -> PathBuf {
        self.home.join(".appImageInstaller")
    }

    /// `~/.appImageInstaller/apps`, one record file per installed app.
    pub fn apps_dir(&self) -> PathBuf {
        self.state_dir().join("apps")
    }

    /// Config file inside the state directory.
    pub fn config_path(&self) -> PathBuf {
        Config::path(&self.home)
    }

    /// Install root, `/opt` by default.
    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Path-visible symlink directory, `/usr/local/bin` by default.
    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// Desktop launcher directory.
    pub fn launcher_dir(&self) -> &Path {
        &self.launcher_dir
    }

    /// Directory that holds the relocated executable of `app_name`.
    pub fn dest_path(&self, app_name: &str) -> PathBuf {
        self.install_root.join(app_name)
    }

    /// Symlink exposing `app_name` on the shell path.
    pub fn symlink_path(&self, app_name: &str) -> PathBuf {
        self.bin_dir.join(app_name)
    }

    /// `.desktop` file for `app_name`.
    pub fn launcher_path(&self, app_name: &str) -> PathBuf {
        self.launcher_dir.join(format!("{app_name}.desktop"))
    }

    /// Where an uninstalled executable named `file_name` is restored.
    pub fn restore_path(&self, file_name: &str) -> PathBuf {
        self.home.join(file_name)
    }

    /// Layout with every location redirected under `root`, for tests.
    #[cfg(test)]
    pub(crate) fn under(root: &Path) -> Self {
        Self {
            home: root.join("home"),
            install_root: root.join("opt"),
            bin_dir: root.join("bin"),
            launcher_dir: root.join("home").join(".local/share/applications"),
            owner: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(elevated: bool) -> Identity {
        Identity {
            user: "u".into(),
            home: PathBuf::from("/home/u"),
            uid: 1000,
            gid: 1000,
            elevated,
        }
    }

    #[test]
    fn test_default_paths() {
        let layout = Layout::new(&identity(false), &Config::default());
        assert_eq!(layout.dest_path("myapp"), PathBuf::from("/opt/myapp"));
        assert_eq!(layout.symlink_path("myapp"), PathBuf::from("/usr/local/bin/myapp"));
        assert_eq!(layout.apps_dir(), PathBuf::from("/home/u/.appImageInstaller/apps"));
        assert_eq!(
            layout.launcher_path("myapp"),
            PathBuf::from("/home/u/.local/share/applications/myapp.desktop")
        );
        assert_eq!(layout.restore_path("MyApp.AppImage"), PathBuf::from("/home/u/MyApp.AppImage"));
        assert_eq!(layout.owner(), None);
    }

    #[test]
    fn test_configured_paths_and_owner() {
        let mut config = Config::default();
        config.paths.install_root = PathBuf::from("/apps");
        config.paths.launcher_dir = Some(PathBuf::from("/launchers"));
        let layout = Layout::new(&identity(true), &config);
        assert_eq!(layout.dest_path("x"), PathBuf::from("/apps/x"));
        assert_eq!(layout.launcher_path("x"), PathBuf::from("/launchers/x.desktop"));
        assert_eq!(layout.owner(), Some(Owner { uid: 1000, gid: 1000 }));
    }
}
