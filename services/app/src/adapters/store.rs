//! services/app/src/adapters/store.rs
//!
//! This module contains the local persistence adapter, the concrete
//! implementation of the `KeyValueStore` port from the `core` crate. It keeps
//! one JSON file per key inside a configured directory, mirroring the
//! whole-value-overwrite semantics of a browser local store.

use std::fs;
use std::io;
use std::path::PathBuf;

use openhealth_core::ports::KeyValueStore;
use tracing::{debug, warn};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A file-backed store that implements the `KeyValueStore` port.
///
/// There is no locking and a `set` replaces the whole file, so concurrent
/// processes sharing a directory are last-write-wins. That matches the
/// contract of the port, not a gap in this adapter.
#[derive(Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates the adapter, creating the backing directory if needed.
    pub fn new(dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers, but never trust them as raw paths.
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

//=========================================================================================
// `KeyValueStore` Trait Implementation
//=========================================================================================

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                debug!(key, error = %e, "failed to read store entry");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = fs::write(self.path_for(key), value) {
            // Fail-open: persistence errors never surface to the caller.
            warn!(key, error = %e, "failed to write store entry");
        }
    }

    fn remove(&self, key: &str) {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(key, error = %e, "failed to remove store entry"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openhealth_core::ports::{load_or, save};

    fn temp_store() -> (tempfile::TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn set_get_remove_round_trip() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get("openhealth_user"), None);
        store.set("openhealth_user", r#"{"name":"A","email":"a@x.com"}"#);
        assert_eq!(
            store.get("openhealth_user").as_deref(),
            Some(r#"{"name":"A","email":"a@x.com"}"#)
        );
        store.remove("openhealth_user");
        assert_eq!(store.get("openhealth_user"), None);
        // Removing a missing key is a no-op, not an error.
        store.remove("openhealth_user");
    }

    #[test]
    fn set_overwrites_the_whole_value() {
        let (_dir, store) = temp_store();
        store.set("k", "[1,2,3]");
        store.set("k", "[4]");
        assert_eq!(store.get("k").as_deref(), Some("[4]"));
    }

    #[test]
    fn corrupt_json_degrades_to_fallback() {
        let (_dir, store) = temp_store();
        store.set("openhealth_problems", "{not json at all");
        let problems: Vec<openhealth_core::Problem> =
            load_or(&store, "openhealth_problems", Vec::new);
        assert!(problems.is_empty());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let (_dir, store) = temp_store();
        save(&store, "nums", &vec![1, 2, 3]);
        let nums: Vec<i32> = load_or(&store, "nums", Vec::new);
        assert_eq!(nums, vec![1, 2, 3]);
    }

    #[test]
    fn keys_are_sanitised_into_file_names() {
        let (dir, store) = temp_store();
        store.set("../escape", "x");
        assert_eq!(store.get("../escape").as_deref(), Some("x"));
        assert!(dir.path().join("___escape.json").exists());
    }
}
