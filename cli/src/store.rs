//! JSON file backing for the core key/value store.
//!
//! The file holds a flat object of string values, the same keys the browser
//! app keeps in `localStorage`. A missing file is an empty store; an
//! unreadable one is logged and treated as empty so a corrupt state file
//! never blocks signing in again.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use campus::KeyValueStore;

const APP_DIR: &str = "campus-events";
const STATE_FILE: &str = "state.json";

#[derive(Clone, Debug)]
pub struct FileStore {
    path: Arc<PathBuf>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: Arc::new(path.into()) }
    }

    /// `<config dir>/campus-events/state.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(STATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(self.path()) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read state file");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt state file");
            BTreeMap::new()
        })
    }

    fn write(&self, entries: &BTreeMap<String, String>) {
        if let Err(e) = self.try_write(entries) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write state file");
        }
    }

    fn try_write(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let rendered = serde_json::to_string_pretty(entries).map_err(io::Error::other)?;
        fs::write(self.path(), rendered)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.read();
        entries.insert(key.to_owned(), value.to_owned());
        self.write(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.read();
        if entries.remove(key).is_some() {
            self.write(&entries);
        }
    }
}
