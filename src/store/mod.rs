
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, IoContext, Result};
use crate::fs_utils::chown_if;
use crate::identity::Owner;
use crate::record::{validate_app_name, InstalledAppRecord};

/// Records found by [`MetadataStore::list_all`].
#[derive(Debug, Default)]
pub struct Listing {
    /// Parsed records, sorted by file name.
    pub records: Vec<(String, InstalledAppRecord)>,
    /// Entries that could not be read or parsed.
    pub problems: Vec<(String, Error)>,
}

/// One JSON file per installed app, named after the app.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    dir: PathBuf,
    owner: Option<Owner>,
}

impl MetadataStore {
    /// Store rooted at `dir`; created files are handed to `owner` when given.
    pub const fn new(dir: PathBuf, owner: Option<Owner>) -> Self {
        Self { dir, owner }
    }

    /// Directory holding the record files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, app_name: &str) -> Result<PathBuf> {
        validate_app_name(app_name)?;
        Ok(self.dir.join(app_name))
    }

    /// Create the store directory and its parent if missing.
    pub fn ensure_ready(&self) -> Result<()> {
        let mut missing = Vec::new();
        let mut cursor = Some(self.dir.as_path());
        for _ in 0..2 {
            let Some(dir) = cursor else { break };
            if !dir.exists() {
                missing.push(dir.to_path_buf());
            }
            cursor = dir.parent();
        }

        fs::create_dir_all(&self.dir).io_context("Failed to create directory", &self.dir)?;
        for dir in missing.iter().rev() {
            debug!(dir = %dir.display(), "created store directory");
            chown_if(dir, self.owner)?;
        }
        Ok(())
    }

    /// Write `record` under its `app_name`, replacing any previous file.
    pub fn put(&self, record: &InstalledAppRecord) -> Result<PathBuf> {
        let path = self.record_path(&record.app_name)?;
        let payload = serde_json::to_string(record).map_err(|e| Error::CorruptRecord {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        fs::write(&path, payload).io_context("Failed to write record", &path)?;
        chown_if(&path, self.owner)?;
        debug!(path = %path.display(), "saved record");
        Ok(path)
    }

    /// Read the record for `app_name`.
    pub fn get(&self, app_name: &str) -> Result<InstalledAppRecord> {
        let path = self.record_path(app_name)?;
        read_record(&path, app_name)
    }

    /// Whether a record file for `app_name` exists.
    pub fn contains(&self, app_name: &str) -> Result<bool> {
        Ok(self.record_path(app_name)?.is_file())
    }

    /// Remove the record for `app_name`.
    pub fn delete(&self, app_name: &str) -> Result<()> {
        let path = self.record_path(app_name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(not_found(app_name, path)),
            Err(e) => Err(e).io_context("Failed to remove record", path),
        }
    }

    /// Parse every file in the store; corrupt entries are collected, not fatal.
    pub fn list_all(&self) -> Result<Listing> {
        let mut listing = Listing::default();
        if !self.dir.exists() {
            return Ok(listing);
        }

        for entry in fs::read_dir(&self.dir).io_context("Failed to read directory", &self.dir)? {
            let entry = entry.io_context("Failed to read directory", &self.dir)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            match read_record(&path, &name) {
                Ok(record) => listing.records.push((name, record)),
                Err(e) => {
                    warn!("skipping record {name}: {e}");
                    listing.problems.push((name, e));
                }
            }
        }

        listing.records.sort_by(|a, b| a.0.cmp(&b.0));
        listing.problems.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(listing)
    }
}

fn read_record(path: &Path, app_name: &str) -> Result<InstalledAppRecord> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(not_found(app_name, path.to_path_buf()))
        }
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            return Err(Error::CorruptRecord {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
        Err(e) => return Err(e).io_context("Failed to read record", path),
    };
    serde_json::from_str(&raw).map_err(|e| Error::CorruptRecord {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn not_found(app_name: &str, path: PathBuf) -> Error {
    Error::NotFound {
        what: format!("record for '{app_name}'"),
        path,
    }
}
