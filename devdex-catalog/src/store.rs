//! JSON record store: load, snapshot, save.
//!
//! The persisted form is a single JSON array of objects. Loading is
//! permissive about missing fields but strict about the document shape;
//! saving is deterministic (stable field order, 2-space indent, trailing
//! newline) so unchanged reruns are byte-identical and diffable.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::ItemRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("{path} is not a JSON array of objects: {detail}")]
    MalformedInput { path: String, detail: String },
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn malformed(path: &Path, detail: impl Into<String>) -> StoreError {
    StoreError::MalformedInput {
        path: path.display().to_string(),
        detail: detail.into(),
    }
}

/// Load the record list from a JSON document.
///
/// Fails with [`StoreError::MalformedInput`] when the top-level value is
/// not an array of objects. Individual records are read permissively:
/// missing optional fields default to empty/false, unknown keys are
/// ignored. Nothing is written on failure.
pub fn load(path: &Path) -> Result<Vec<ItemRecord>, StoreError> {
    let contents = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let value: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| malformed(path, e.to_string()))?;

    let serde_json::Value::Array(elements) = value else {
        return Err(malformed(path, "top-level value is not an array"));
    };

    let mut records = Vec::with_capacity(elements.len());
    for (i, element) in elements.into_iter().enumerate() {
        if !element.is_object() {
            return Err(malformed(path, format!("element {i} is not an object")));
        }
        let record: ItemRecord = serde_json::from_value(element)
            .map_err(|e| malformed(path, format!("element {i}: {e}")))?;
        records.push(record);
    }

    Ok(records)
}

/// Serialize records exactly as [`save`] writes them.
///
/// Exposed separately so pipeline determinism can be asserted on strings
/// without touching the filesystem.
pub fn to_json_string(records: &[ItemRecord]) -> Result<String, StoreError> {
    let mut contents = serde_json::to_string_pretty(records)?;
    contents.push('\n');
    Ok(contents)
}

/// Persist the record list.
///
/// Writes to a temp file in the same directory and renames it over the
/// target, so a failed write never leaves a truncated data file behind.
pub fn save(path: &Path, records: &[ItemRecord]) -> Result<(), StoreError> {
    let contents = to_json_string(records)?;
    let tmp = tmp_path(path);
    fs::write(&tmp, contents).map_err(|e| io_error(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| io_error(path, e))?;
    Ok(())
}

/// Write a backup of the current state next to the data file, before a
/// destructive pass runs.
///
/// The backup is named `<stem>.<label>.<timestamp>.bak` and is never
/// overwritten; repeated runs accumulate backup files. Returns the path
/// actually written. This is the entire failure-recovery story: a human
/// diffs or restores from the most recent backup by hand.
pub fn snapshot(path: &Path, records: &[ItemRecord], label: &str) -> Result<PathBuf, StoreError> {
    let contents = to_json_string(records)?;
    let backup = backup_path(path, label);
    fs::write(&backup, contents).map_err(|e| io_error(&backup, e))?;
    Ok(backup)
}

fn tmp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("data.json");
    path.with_file_name(format!("{name}.tmp"))
}

fn backup_path(path: &Path, label: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("data");
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");

    let mut candidate = path.with_file_name(format!("{stem}.{label}.{stamp}.bak"));
    // Two snapshots in the same second get numeric suffixes
    let mut n = 1u32;
    while candidate.exists() {
        candidate = path.with_file_name(format!("{stem}.{label}.{stamp}-{n}.bak"));
        n += 1;
    }
    candidate
}
