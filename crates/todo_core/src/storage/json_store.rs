use crate::error::AppError;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
const STORE_FILE_NAME: &str = "store.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredEntries {
    schema_version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var("TODOAPP_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("todoapp").join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("todoapp")
            .join(STORE_FILE_NAME))
    }
}

/// A [`KeyValueStore`] kept in a single JSON file.
///
/// Every write rewrites the whole file. A file that cannot be read or parsed
/// behaves as if it held no entries; the next write replaces it.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Result<Self, AppError> {
        Ok(Self::open(store_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, AppError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|err| AppError::io(err.to_string()))?;
        let stored: StoredEntries = serde_json::from_str(&content)
            .map_err(|err| AppError::invalid_data(err.to_string()))?;

        if !(1..=SCHEMA_VERSION).contains(&stored.schema_version) {
            return Err(AppError::invalid_data("schema_version mismatch"));
        }

        Ok(stored.entries)
    }

    fn read_entries_lenient(&self) -> BTreeMap<String, String> {
        match self.read_entries() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "ignoring unreadable store file"
                );
                BTreeMap::new()
            }
        }
    }

    fn write_entries(&self, entries: BTreeMap<String, String>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
        }

        let stored = StoredEntries {
            schema_version: SCHEMA_VERSION,
            entries,
        };
        let content = serde_json::to_string_pretty(&stored)
            .map_err(|err| AppError::invalid_data(err.to_string()))?;
        std::fs::write(&self.path, content).map_err(|err| AppError::io(err.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, permissions)
                .map_err(|err| AppError::io(err.to_string()))?;
        }

        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.read_entries_lenient().remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self.read_entries_lenient();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(entries)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), AppError> {
        let mut entries = self.read_entries_lenient();
        if entries.remove(key).is_some() {
            self.write_entries(entries)?;
        }
        Ok(())
    }
}
