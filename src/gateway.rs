// Load/save boundary between the store and the employee file

use crate::error::PersistError;
use crate::jsonl::{self, JsonlFile};
use crate::models::Employee;
use crate::store::Store;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

pub const FORMAT_NAME: &str = "emprecord";
pub const CURRENT_VERSION: u32 = 1;

/// First line of every employee file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHeader {
    pub format: String,
    pub version: u32,
}

impl Default for FileHeader {
    fn default() -> Self {
        Self {
            format: FORMAT_NAME.to_string(),
            version: CURRENT_VERSION,
        }
    }
}

/// Exclusive hold on an employee file for the length of a session
///
/// Released when dropped.
#[derive(Debug)]
pub struct SessionLock {
    file: File,
    path: PathBuf,
}

impl SessionLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SessionLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!(file = ?self.path, error = ?e, "Failed to release session lock");
        }
    }
}

/// Reads and writes the full record sequence at a single path
#[derive(Debug, Clone)]
pub struct Gateway {
    path: PathBuf,
}

impl Gateway {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file with `records`, in order
    pub fn save(&self, records: &[Employee]) -> Result<(), PersistError> {
        jsonl::write_jsonl(&self.path, &FileHeader::default(), records)?;
        info!(file = ?self.path, count = records.len(), "Saved employee records");
        Ok(())
    }

    /// Read every record, in file order
    ///
    /// A missing file yields an empty list. A file with a foreign header, an
    /// unknown version, an undecodable line, or a repeated employee number
    /// is reported as corrupt.
    pub fn load(&self) -> Result<Vec<Employee>, PersistError> {
        let file: JsonlFile<FileHeader, Employee> = match jsonl::read_jsonl(&self.path)? {
            Some(file) => file,
            None => {
                info!(file = ?self.path, "No existing records found, starting empty");
                return Ok(Vec::new());
            }
        };

        if file.header.format != FORMAT_NAME {
            return Err(PersistError::MissingHeader {
                path: self.path.clone(),
            });
        }
        if file.header.version != CURRENT_VERSION {
            return Err(PersistError::UnsupportedVersion {
                path: self.path.clone(),
                found: file.header.version,
                expected: CURRENT_VERSION,
            });
        }

        let mut seen = HashSet::new();
        let mut employees = Vec::with_capacity(file.records.len());
        for (line, employee) in file.records {
            if !seen.insert(employee.id) {
                return Err(PersistError::DuplicateId {
                    path: self.path.clone(),
                    line,
                    id: employee.id,
                });
            }
            employees.push(employee);
        }

        Ok(employees)
    }

    /// Load into a store, falling back to an empty one
    ///
    /// An unreadable file is logged and moved aside so that saving the
    /// session does not overwrite it.
    pub fn load_store(&self) -> Store {
        match self.load() {
            Ok(employees) => Store::from_records(employees),
            Err(e) => {
                error!(file = ?self.path, error = %e, "Failed to load employee records, starting empty");
                if e.is_corrupt() {
                    match self.quarantine() {
                        Ok(Some(moved)) => warn!(file = ?moved, "Unreadable employee file moved aside"),
                        Ok(None) => {}
                        Err(e) => error!(error = %e, "Failed to move unreadable employee file aside"),
                    }
                }
                Store::new()
            }
        }
    }

    /// Rename the file to `<file>.corrupt`, returning the new path
    ///
    /// Earlier quarantined files are kept: when `<file>.corrupt` exists the
    /// next free `<file>.corrupt.N` is used. Returns `Ok(None)` when there is
    /// nothing to move.
    pub fn quarantine(&self) -> Result<Option<PathBuf>, PersistError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut target = jsonl::sibling(&self.path, ".corrupt");
        let mut attempt = 0u32;
        while target.exists() {
            attempt += 1;
            target = jsonl::sibling(&self.path, &format!(".corrupt.{}", attempt));
        }
        fs::rename(&self.path, &target).map_err(|e| PersistError::io(&self.path, e))?;
        Ok(Some(target))
    }

    /// Take the session lock on `<file>.lock`
    ///
    /// Fails with `PersistError::Locked` if another session holds it.
    pub fn lock(&self) -> Result<SessionLock, PersistError> {
        let lock_path = jsonl::sibling(&self.path, ".lock");
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PersistError::io(parent, e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| PersistError::io(&lock_path, e))?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                debug!(file = ?lock_path, "Acquired session lock");
                Ok(SessionLock { file, path: lock_path })
            }
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => Err(PersistError::Locked {
                path: self.path.clone(),
            }),
            Err(e) => Err(PersistError::io(&lock_path, e)),
        }
    }
}
