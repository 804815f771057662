//! Cache file loading and saving.
//!
//! The whole entry map is one JSON object keyed by URL, rewritten wholesale on
//! every mutation.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::cache::CacheEntry;
use crate::error_handling::CachePersistenceError;

/// Loads the entry map. A missing file is an empty cache, not an error.
pub(crate) fn load_entries(
    path: &Path,
) -> Result<HashMap<String, CacheEntry>, CachePersistenceError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = std::fs::read_to_string(path).map_err(|source| CachePersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CachePersistenceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the entry map, creating the parent directory if needed.
///
/// Keys are written in sorted order so the file is stable between runs.
pub(crate) fn save_entries(
    path: &Path,
    entries: &HashMap<String, CacheEntry>,
) -> Result<(), CachePersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| CachePersistenceError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let sorted: BTreeMap<&String, &CacheEntry> = entries.iter().collect();
    let content =
        serde_json::to_string_pretty(&sorted).map_err(CachePersistenceError::Serialize)?;
    std::fs::write(path, content).map_err(|source| CachePersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })
}
