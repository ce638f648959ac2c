//! JSON file persistence for inventory snapshots.
//!
//! The file is a single UTF-8 JSON object: item names as keys, integer
//! quantities as values. No versioning, no nesting.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;

use stockpile_core::ItemName;

/// Default location of the inventory file, relative to the working directory.
pub const DEFAULT_INVENTORY_PATH: &str = "inventory.json";

/// Detached item-to-quantity mapping, as read from or written to disk.
///
/// Keeps insertion order, which is also the key order of the JSON object.
pub type InventorySnapshot = IndexMap<ItemName, i64>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access inventory file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed inventory file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Json { path, .. } => path,
        }
    }
}

/// Serialize `snapshot` to `path`, replacing any existing file.
pub fn save(snapshot: &InventorySnapshot, path: impl AsRef<Path>) -> Result<(), StorageError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| StorageError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, snapshot).map_err(|e| StorageError::json(path, e))?;
    writer.flush().map_err(|e| StorageError::io(path, e))?;

    tracing::info!(path = %path.display(), items = snapshot.len(), "saved inventory");
    Ok(())
}

/// Read and parse the JSON object at `path`.
///
/// Keys must be non-empty names and values integers; anything else is
/// reported as [`StorageError::Json`].
pub fn load(path: impl AsRef<Path>) -> Result<InventorySnapshot, StorageError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    let snapshot: InventorySnapshot =
        serde_json::from_str(&raw).map_err(|e| StorageError::json(path, e))?;

    tracing::info!(path = %path.display(), items = snapshot.len(), "loaded inventory");
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ItemName {
        ItemName::new(s).unwrap()
    }

    #[test]
    fn saved_file_is_a_flat_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        let snapshot = InventorySnapshot::from([(name("apple"), 7), (name("banana"), -2)]);

        save(&snapshot, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"apple":7,"banana":-2}"#);
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, r#"{"old":1,"stale":2,"padding":"xxxxxxxxxxxxxxxx"}"#).unwrap();

        save(&InventorySnapshot::from([(name("new"), 3)]), &path).unwrap();

        assert_eq!(load(&path).unwrap(), InventorySnapshot::from([(name("new"), 3)]));
    }

    #[test]
    fn load_keeps_file_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, r#"{"pear":1,"apple":2," ":3}"#).unwrap();

        let snapshot = load(&path).unwrap();
        let names: Vec<_> = snapshot.keys().map(ItemName::as_str).collect();
        assert_eq!(names, vec!["pear", "apple", " "]);

        save(&snapshot, &path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{"pear":1,"apple":2," ":3}"#
        );
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(load(&path).unwrap_err(), StorageError::Json { .. }));
    }

    #[test]
    fn load_rejects_non_integer_quantities_and_empty_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");

        std::fs::write(&path, r#"{"apple":"ten"}"#).unwrap();
        assert!(matches!(load(&path).unwrap_err(), StorageError::Json { .. }));

        std::fs::write(&path, r#"{"":1}"#).unwrap();
        assert!(matches!(load(&path).unwrap_err(), StorageError::Json { .. }));

        std::fs::write(&path, r#"["apple",1]"#).unwrap();
        assert!(matches!(load(&path).unwrap_err(), StorageError::Json { .. }));
    }
}
