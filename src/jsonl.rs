// JSONL file operations

use crate::error::PersistError;
use serde::{Serialize, de::DeserializeOwned};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Contents of a JSONL file: one header line, then one record per line
#[derive(Debug)]
pub struct JsonlFile<H, T> {
    pub header: H,
    /// Records paired with their 1-based line number
    pub records: Vec<(usize, T)>,
}

/// Write a header and all records, replacing the file in one step
///
/// Data goes to a sibling `.tmp` file which is synced and then renamed over
/// `path`, so readers see either the old or the new contents.
pub fn write_jsonl<H, T>(path: &Path, header: &H, records: &[T]) -> Result<(), PersistError>
where
    H: Serialize,
    T: Serialize,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistError::io(parent, e))?;
    }

    let tmp_path = sibling(path, ".tmp");
    let file = File::create(&tmp_path).map_err(|e| PersistError::io(&tmp_path, e))?;
    let mut writer = BufWriter::new(file);

    write_line(&mut writer, header, &tmp_path)?;
    for record in records {
        write_line(&mut writer, record, &tmp_path)?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| PersistError::io(&tmp_path, e.into_error()))?;
    file.sync_all().map_err(|e| PersistError::io(&tmp_path, e))?;
    drop(file);

    fs::rename(&tmp_path, path).map_err(|e| PersistError::io(path, e))?;

    debug!(file = ?path, count = records.len(), "Wrote JSONL file");
    Ok(())
}

/// Read a JSONL file written by `write_jsonl`
///
/// Returns `Ok(None)` when the file does not exist. Blank lines are ignored.
/// An empty file, a bad header, or any line that is not UTF-8 or fails to
/// decode is an error.
pub fn read_jsonl<H, T>(path: &Path) -> Result<Option<JsonlFile<H, T>>, PersistError>
where
    H: DeserializeOwned,
    T: DeserializeOwned,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(file = ?path, "JSONL file does not exist");
            return Ok(None);
        }
        Err(e) => return Err(PersistError::io(path, e)),
    };

    let reader = BufReader::new(file);
    let mut header: Option<H> = None;
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_num = index + 1;
        let line = line.map_err(|e| match e.kind() {
            ErrorKind::InvalidData => PersistError::InvalidUtf8 {
                path: path.to_path_buf(),
                line: line_num,
            },
            _ => PersistError::io(path, e),
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let malformed = |source| PersistError::Malformed {
            path: path.to_path_buf(),
            line: line_num,
            source,
        };

        if header.is_none() {
            header = Some(serde_json::from_str(&line).map_err(|_| PersistError::MissingHeader {
                path: path.to_path_buf(),
            })?);
            continue;
        }

        let record: T = serde_json::from_str(&line).map_err(malformed)?;
        records.push((line_num, record));
    }

    let header = header.ok_or_else(|| PersistError::MissingHeader {
        path: path.to_path_buf(),
    })?;

    info!(file = ?path, count = records.len(), "Loaded records from JSONL");
    Ok(Some(JsonlFile { header, records }))
}

/// `path` with `suffix` appended to its file name
pub(crate) fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

fn write_line<W: Write, V: Serialize + ?Sized>(writer: &mut W, value: &V, path: &Path) -> Result<(), PersistError> {
    serde_json::to_writer(&mut *writer, value).map_err(|e| PersistError::io(path, e.into()))?;
    writeln!(writer).map_err(|e| PersistError::io(path, e))
}
