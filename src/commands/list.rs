use std::fmt::Write;

use anyhow::Result;
use appimage_installer::installer::Inventory;
use appimage_installer::Installer;

pub fn cmd_list(installer: &Installer) -> Result<()> {
    let inventory = installer.list_installed()?;
    print!("{}", render(&inventory));
    Ok(())
}

fn render(inventory: &Inventory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Installed apps: {}", inventory.apps.len());

    for app in &inventory.apps {
        let record = &app.record;
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", record.app_name);
        let _ = writeln!(out, "    App name:            {}", record.app_name);
        let _ = writeln!(out, "    Installation path:   {}", record.dest_path);
        let _ = writeln!(out, "    Executable symlink:  {}", record.symlink);
        let _ = writeln!(out, "    Original file name:  {}", record.app_file_path);
        let _ = writeln!(out, "    Status:              {}", app.health);
    }

    if !inventory.problems.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Unreadable records: {}", inventory.problems.len());
        for (name, err) in &inventory.problems {
            let _ = writeln!(out, "    {name}: {err}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use appimage_installer::installer::{Health, InstalledApp};
    use appimage_installer::{Error, InstalledAppRecord};
    use std::path::PathBuf;

    fn app(name: &str, health: Health) -> InstalledApp {
        InstalledApp {
            record: InstalledAppRecord {
                app_name: name.into(),
                dest_path: format!("/opt/{name}"),
                app_file_path: format!("{name}.AppImage"),
                symlink: format!("/usr/local/bin/{name}"),
            },
            health,
        }
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&Inventory::default()), "Installed apps: 0\n");
    }

    #[test]
    fn test_render_apps_and_problems() {
        let inventory = Inventory {
            apps: vec![app("alpha", Health::Healthy), app("beta", Health::MissingSymlink)],
            problems: vec![(
                "broken".into(),
                Error::CorruptRecord {
                    path: PathBuf::from("/home/u/.appImageInstaller/apps/broken"),
                    reason: "EOF while parsing a value at line 1 column 0".into(),
                },
            )],
        };
        insta::assert_snapshot!(render(&inventory), @r"
        Installed apps: 2

        alpha
            App name:            alpha
            Installation path:   /opt/alpha
            Executable symlink:  /usr/local/bin/alpha
            Original file name:  alpha.AppImage
            Status:              ok

        beta
            App name:            beta
            Installation path:   /opt/beta
            Executable symlink:  /usr/local/bin/beta
            Original file name:  beta.AppImage
            Status:              symlink missing

        Unreadable records: 1
            broken: corrupt record /home/u/.appImageInstaller/apps/broken: EOF while parsing a value at line 1 column 0
        ");
    }
}
