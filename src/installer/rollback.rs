use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::fs_utils::{move_file, remove_file_if_exists};

/// Compensation for one completed install step.
#[derive(Debug)]
enum Undo {
    RemoveDir(PathBuf),
    MoveBack { from: PathBuf, to: PathBuf },
    RestoreMode { path: PathBuf, mode: u32 },
    RemoveSymlink(PathBuf),
}

/// Completed install steps, undone in reverse order if a later step fails.
#[derive(Debug, Default)]
pub(super) struct Rollback {
    steps: Vec<Undo>,
}

impl Rollback {
    pub(super) fn created_dir(&mut self, dir: PathBuf) {
        self.steps.push(Undo::RemoveDir(dir));
    }

    pub(super) fn moved(&mut self, from: PathBuf, to: PathBuf) {
        self.steps.push(Undo::MoveBack { from: to, to: from });
    }

    pub(super) fn changed_mode(&mut self, path: PathBuf, mode: u32) {
        self.steps.push(Undo::RestoreMode { path, mode });
    }

    pub(super) fn linked(&mut self, link: PathBuf) {
        self.steps.push(Undo::RemoveSymlink(link));
    }

    /// Run every compensation, newest first. Failures are logged and skipped.
    pub(super) fn unwind(self) {
        for step in self.steps.into_iter().rev() {
            debug!(?step, "rolling back");
            let result = match &step {
                Undo::RemoveDir(dir) => fs::remove_dir(dir).map_err(|e| e.to_string()),
                Undo::MoveBack { from, to } => move_file(from, to).map_err(|e| e.to_string()),
                Undo::RestoreMode { path, mode } => {
                    fs::set_permissions(path, fs::Permissions::from_mode(*mode))
                        .map_err(|e| e.to_string())
                }
                Undo::RemoveSymlink(link) => {
                    remove_file_if_exists(link).map(|_| ()).map_err(|e| e.to_string())
                }
            };
            if let Err(e) = result {
                warn!("rollback step {step:?} failed: {e}");
            }
        }
    }
}
