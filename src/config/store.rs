//! Durable key-value store for window geometry and settings
//!
//! The coordinator only sees the `SettingsStore` trait. `JsonFileStore` keeps
//! every key in one pretty-printed JSON object on disk and rewrites it on
//! every `set`; `MemoryStore` backs tests and `--ephemeral` runs.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::settings::AppSettings;
use crate::constants::{app, keys, setup, timer};
use crate::types::Size;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store at {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("store at {path} must hold a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("store is unavailable")]
    Unavailable,
}

/// Opaque key-value capability. Reads and writes are synchronous.
pub trait SettingsStore {
    fn get_value(&self, key: &str) -> Option<Value>;

    /// Replace `key` and make the change durable before returning
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), StoreError>;

    fn is_available(&self) -> bool {
        true
    }
}

/// Typed access on top of any `SettingsStore`
pub trait SettingsStoreExt: SettingsStore {
    /// Missing keys and values of the wrong shape both read as `None`
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get_value(key)?;
        serde_json::from_value(value)
            .inspect_err(|e| error!(key, error = %e, "Stored value has unexpected shape, ignoring"))
            .ok()
    }

    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.set_value(key, value)
    }
}

impl<S: SettingsStore + ?Sized> SettingsStoreExt for S {}

/// Values seeded into a store for every key it does not hold yet.
/// Setup position has no default: absence means "center on first show".
pub fn default_entries() -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert(
        keys::SETUP_WINDOW_SIZE.to_string(),
        size_value(Size::new(setup::DEFAULT_WIDTH, setup::DEFAULT_HEIGHT)),
    );
    defaults.insert(
        keys::TIMER_WINDOW_SIZE.to_string(),
        size_value(Size::new(timer::DEFAULT_WIDTH, timer::DEFAULT_HEIGHT)),
    );
    defaults.insert(
        keys::APP_SETTINGS.to_string(),
        serde_json::json!(AppSettings::default()),
    );
    defaults
}

fn size_value(size: Size) -> Value {
    serde_json::json!({ "width": size.width, "height": size.height })
}

/// Insert defaults for absent keys; returns the keys that were added
fn seed_defaults(values: &mut Map<String, Value>) -> Vec<String> {
    let mut added = Vec::new();
    for (key, value) in default_entries() {
        if !values.contains_key(&key) {
            values.insert(key.clone(), value);
            added.push(key);
        }
    }
    added
}

/// JSON file backed store
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// `<config_dir>/kronos/config.json`, with `config_dir` from the
    /// platform unless overridden
    pub fn default_path(config_dir: Option<&Path>) -> PathBuf {
        let mut path = match config_dir {
            Some(dir) => dir.to_path_buf(),
            None => {
                let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
                path.push(app::CONFIG_DIR);
                path
            }
        };
        path.push(app::CONFIG_FILENAME);
        path
    }

    /// Load the store, seeding defaults for absent keys.
    /// A file that exists but cannot be parsed is an error and is left untouched.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let mut values = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            match serde_json::from_str::<Value>(&contents) {
                Ok(Value::Object(map)) => map,
                Ok(_) => return Err(StoreError::NotAnObject { path }),
                Err(source) => return Err(StoreError::Parse { path, source }),
            }
        } else {
            info!(path = %path.display(), "Store file not found, creating with defaults");
            Map::new()
        };

        let added = seed_defaults(&mut values);
        if !added.is_empty() {
            debug!(added_keys = ?added, "Seeded default(s) into store");
            write_atomically(&path, &values)?;
        }
        let store = Self { path, values };

        info!(path = %store.path.display(), keys = store.values.len(), "Opened settings store");
        Ok(store)
    }

    /// Delete the store file so the next `open` reseeds defaults
    pub fn reset(path: &Path) -> Result<(), StoreError> {
        if path.exists() {
            fs::remove_file(path).map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            info!(path = %path.display(), "Removed persisted store");
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write-then-rename so a crash never leaves a truncated store
fn write_atomically(path: &Path, values: &Map<String, Value>) -> Result<(), StoreError> {
    let io_err = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let contents = serde_json::to_string_pretty(values).map_err(|source| StoreError::Serialize {
        key: "<store>".to_string(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

impl SettingsStore for JsonFileStore {
    fn get_value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    /// Memory only changes once the file write succeeded
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut updated = self.values.clone();
        updated.insert(key.to_string(), value);
        write_atomically(&self.path, &updated)?;
        self.values = updated;
        Ok(())
    }
}

/// In-memory store. Starts seeded with defaults, like a fresh file store.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: Map<String, Value>,
    available: bool,
    writes: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let mut values = Map::new();
        seed_defaults(&mut values);
        Self {
            values,
            available: true,
            writes: 0,
        }
    }

    /// Store with no keys at all, not even defaults
    pub fn empty() -> Self {
        Self {
            values: Map::new(),
            available: true,
            writes: 0,
        }
    }

    /// Simulate the store going away mid-session
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Number of successful writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SettingsStore for MemoryStore {
    fn get_value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        if !self.available {
            return Err(StoreError::Unavailable);
        }
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available
    }
}
