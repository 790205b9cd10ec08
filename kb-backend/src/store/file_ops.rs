//! File operations for the JSON collection files
//!
//! Each collection is a single JSON array rewritten in full on every save.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::StoreError;

fn io_err(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn json_err(path: &Path, source: serde_json::Error) -> StoreError {
    StoreError::Json {
        path: path.display().to_string(),
        source,
    }
}

/// Create `path` holding an empty array if it does not exist yet.
/// Returns true when the file was created.
pub fn ensure_collection_file(path: &Path) -> Result<bool, StoreError> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    fs::write(path, "[]").map_err(|e| io_err(path, e))?;
    Ok(true)
}

/// Read a collection file. A blank file reads as an empty collection.
pub fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let raw = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&raw).map_err(|e| json_err(path, e))
}

/// Rewrite a collection file with the full, pretty-printed array
pub fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(items).map_err(|e| json_err(path, e))?;
    fs::write(path, json).map_err(|e| io_err(path, e))
}
