//! Native backend: one JSON object on disk

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::KeyValueStore;

/// Environment variable overriding the data file location
pub const DATA_ENV: &str = "GAPWING_DATA";

const DEFAULT_FILE: &str = "gapwing.json";

pub(super) fn default_path() -> PathBuf {
    std::env::var_os(DATA_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE))
}

/// Key/value pairs kept in a single JSON file, rewritten on every set
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store. A missing or corrupt file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring corrupt data file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("Could not read data file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, items }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let json = match serde_json::to_string_pretty(&self.items) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode data file: {}", e);
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, json) {
            log::warn!("Could not write data file {}: {}", self.path.display(), e);
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gapwing-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_persists_across_opens() {
        let path = temp_path("persist");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get_item("best"), None);
        store.set_item("best", "12");

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get_item("best").as_deref(), Some("12"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_reads_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get_item("best"), None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unwritable_path_is_silent() {
        let mut store = JsonFileStore::open(std::env::temp_dir().join("no-such-dir-gapwing/x/y.json"));
        store.set_item("best", "3");
        // Still readable from memory even though the write failed
        assert_eq!(store.get_item("best").as_deref(), Some("3"));
    }
}
