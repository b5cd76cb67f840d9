use std::{collections::HashMap, fs, io::ErrorKind, path::{Path, PathBuf}};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::{error::StoreError, form::AdForm, item::Item};

/// Key the saved form is stored under.
pub const SAVE_KEY: &str = "save_file";

/// Saved headlines and descriptions, as stored in JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFile {
    #[serde(default)]
    pub headline_objs: Vec<Item>,

    #[serde(default)]
    pub description_objs: Vec<Item>,
}

impl SaveFile {
    pub fn capture(form: &AdForm) -> SaveFile {
        SaveFile {
            headline_objs: form.headlines.clone(),
            description_objs: form.descriptions.clone(),
        }
    }

    pub fn restore(self) -> AdForm {
        AdForm::new(self.headline_objs, self.description_objs)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse saved JSON. Anything unreadable is treated as nothing saved.
    pub fn from_json(json: &str) -> Option<SaveFile> {
        match serde_json::from_str(json) {
            Ok(save_file) => Some(save_file),
            Err(e) => {
                warn!(error = %e, "ignoring malformed saved state");
                None
            }
        }
    }
}

/// A durable string key-value store
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Stores each key as "{key}.json" under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> FileStore {
        FileStore { dir: dir.as_ref().to_path_buf() }
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path(key);

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;

        let path = self.path(key);
        fs::write(&path, value).map_err(|source| StoreError::Io { path, source })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path(key);

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

pub fn save(store: &mut impl Store, form: &AdForm) -> Result<(), StoreError> {
    let json = SaveFile::capture(form).to_json()?;
    store.set(SAVE_KEY, &json)?;

    debug!(headlines = form.headlines.len(), descriptions = form.descriptions.len(), "saved form");
    Ok(())
}

/// Load the saved form, if there is one and it is readable.
pub fn load(store: &impl Store) -> Result<Option<AdForm>, StoreError> {
    let Some(json) = store.get(SAVE_KEY)? else { return Ok(None); };
    Ok(SaveFile::from_json(&json).map(SaveFile::restore))
}

pub fn reset(store: &mut impl Store) -> Result<(), StoreError> {
    store.remove(SAVE_KEY)
}
