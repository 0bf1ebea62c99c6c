use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Numeric owner assigned to files created on behalf of the real user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    /// User id.
    pub uid: u32,
    /// Group id.
    pub gid: u32,
}

/// The user this invocation acts for.
///
/// Under `sudo` the process runs as root but every file written into the
/// user's home must still belong to the user who typed the command, so the
/// identity is resolved once from the `SUDO_*` variables instead of from the
/// effective credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Login name of the real user.
    pub user: String,
    /// Home directory of the real user.
    pub home: PathBuf,
    /// Real user id.
    pub uid: u32,
    /// Real primary group id.
    pub gid: u32,
    /// Whether the process itself runs with root privileges.
    pub elevated: bool,
}

impl Identity {
    /// Resolve the real user from the process environment.
    pub fn detect() -> Result<Self> {
        let (euid, egid) = effective_ids();
        let elevated = euid == 0;

        let sudo = if elevated { sudo_identity() } else { None };
        let (user, uid, gid) = match sudo {
            Some(ids) => ids,
            None => {
                let user = std::env::var("USER")
                    .or_else(|_| std::env::var("LOGNAME"))
                    .unwrap_or_else(|_| if elevated { "root".into() } else { String::new() });
                (user, euid, egid)
            }
        };

        let home = passwd_home(Path::new("/etc/passwd"), &user)
            .or_else(|| if elevated && uid != 0 { None } else { dirs::home_dir() })
            .ok_or_else(|| Error::Config(format!("could not determine home directory of '{user}'")))?;

        debug!(%user, uid, gid, elevated, home = %home.display(), "resolved identity");
        Ok(Self { user, home, uid, gid, elevated })
    }

    /// Owner to assign to created files, only when running elevated.
    pub const fn owner(&self) -> Option<Owner> {
        if self.elevated {
            Some(Owner { uid: self.uid, gid: self.gid })
        } else {
            None
        }
    }
}

fn sudo_identity() -> Option<(String, u32, u32)> {
    let user = std::env::var("SUDO_USER").ok()?;
    let uid = std::env::var("SUDO_UID").ok()?.parse().ok()?;
    let gid = std::env::var("SUDO_GID").ok()?.parse().ok()?;
    Some((user, uid, gid))
}

/// Effective uid/gid, read from the owner of this process's `/proc` entry.
#[cfg(target_os = "linux")]
fn effective_ids() -> (u32, u32) {
    use std::os::unix::fs::MetadataExt;

    match std::fs::metadata("/proc/self") {
        Ok(meta) => (meta.uid(), meta.gid()),
        Err(_) => fallback_ids(),
    }
}

#[cfg(not(target_os = "linux"))]
fn effective_ids() -> (u32, u32) {
    fallback_ids()
}

fn fallback_ids() -> (u32, u32) {
    if std::env::var("USER").is_ok_and(|u| u == "root") {
        (0, 0)
    } else {
        (u32::MAX, u32::MAX)
    }
}

/// Look up `user`'s home directory in a passwd-format file.
pub(crate) fn passwd_home(passwd: &Path, user: &str) -> Option<PathBuf> {
    if user.is_empty() {
        return None;
    }
    let content = std::fs::read_to_string(passwd).ok()?;
    parse_passwd_home(&content, user)
}

fn parse_passwd_home(content: &str, user: &str) -> Option<PathBuf> {
    content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let fields: Vec<&str> = line.split(':').collect();
            if fields.len() >= 7 && fields[0] == user && !fields[5].is_empty() {
                Some(PathBuf::from(fields[5]))
            } else {
                None
            }
        })
}
