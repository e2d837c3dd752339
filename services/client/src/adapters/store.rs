//! services/client/src/adapters/store.rs
//!
//! Key-value stores backing the draft autosave. `JsonFileStore` keeps a flat
//! JSON object on disk; `MemoryStore` is used when persistence is not wanted.

use sentiment_core::ports::{KeyValueStore, PortError, PortResult};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

//=========================================================================================
// JSON File Store
//=========================================================================================

pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> PortResult<Map<String, Value>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            PortError::Unexpected(format!("{} is not a JSON object: {}", self.path.display(), e))
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        let values = self.read_all()?;
        Ok(values.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| PortError::Unexpected("store lock poisoned".to_string()))?;

        let mut values = self.read_all()?;
        values.insert(key.to_string(), Value::String(value.to_string()));
        let serialized = serde_json::to_string_pretty(&values)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PortError::Unexpected(e.to_string()))?;
        }
        // Write then rename so a crash never leaves a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serialized).map_err(|e| PortError::Unexpected(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

//=========================================================================================
// In-Memory Store
//=========================================================================================

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| PortError::Unexpected("store lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        self.values
            .lock()
            .map_err(|_| PortError::Unexpected("store lock poisoned".to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
