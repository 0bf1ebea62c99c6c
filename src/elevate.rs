use std::ffi::OsString;
use std::os::unix::process::CommandExt;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

/// Replace the current process with `sudo <this executable> <args…>`.
///
/// Only returns if the exec itself fails.
pub fn reexec_with_sudo() -> Result<()> {
    let sudo = which::which("sudo").context("`sudo` is not on PATH; re-run as root or pass --force")?;
    let exe = std::env::current_exe().context("Failed to get current executable path")?;
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    debug!(sudo = %sudo.display(), exe = %exe.display(), "re-executing with sudo");
    let err = sudo_command(&sudo, &exe, &args).exec();
    Err(err).context("Failed to exec sudo")
}

fn sudo_command(sudo: &std::path::Path, exe: &std::path::Path, args: &[OsString]) -> Command {
    let mut cmd = Command::new(sudo);
    cmd.arg(exe).args(args);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_sudo_command_forwards_arguments() {
        let args = vec![OsString::from("install"), OsString::from("a.AppImage"), OsString::from("a")];
        let cmd = sudo_command(Path::new("/usr/bin/sudo"), Path::new("/usr/local/bin/appimage-installer"), &args);
        assert_eq!(cmd.get_program(), "/usr/bin/sudo");
        let forwarded: Vec<_> = cmd.get_args().collect();
        assert_eq!(
            forwarded,
            ["/usr/local/bin/appimage-installer", "install", "a.AppImage", "a"]
        );
    }
}
