//! Persistence layer for branch stores
//!
//! One file per store. Writes go to a `.tmp` sibling and are renamed into
//! place; loads decode into a staging store and only swap on success.

use crate::codec;
use crate::error::StoreError;
use crate::store::BranchStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Write `store` to `path` atomically.
pub fn save_store(store: &BranchStore, path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::IoError(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create directory {:?}: {}", parent, e),
                ))
            })?;
        }
    }

    let bytes = codec::encode(store);
    let temp_path = temp_path_for(path);

    fs::write(&temp_path, &bytes).map_err(|e| {
        StoreError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to write store to {:?}: {}", temp_path, e),
        ))
    })?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        StoreError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to rename temp file to {:?}: {}", path, e),
        ))
    })?;

    Ok(())
}

/// Replace the persisted sections of `store` with the contents of `path`.
///
/// On any failure `store` is left exactly as it was.
pub fn load_store(store: &mut BranchStore, path: &Path) -> Result<(), StoreError> {
    let bytes = fs::read(path).map_err(|e| {
        StoreError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to read store from {:?}: {}", path, e),
        ))
    })?;

    let staged = codec::decode(&bytes).map_err(|e| {
        warn!(store = %store.name, path = %path.display(), error = %e, "Rejected store file");
        StoreError::Decode(e)
    })?;

    store.restore_from(staged);
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
