// SPDX-License-Identifier: MPL-2.0
//! Persistence of the selected language.

use crate::config;
use crate::error::Result;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Stores the last selected language code.
pub trait PreferenceStore: Send {
    /// The stored code, unvalidated. `None` when nothing was saved yet.
    fn load(&self) -> Option<String>;

    fn save(&mut self, code: &str) -> Result<()>;
}

impl<P: PreferenceStore + ?Sized> PreferenceStore for Box<P> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&mut self, code: &str) -> Result<()> {
        (**self).save(code)
    }
}

/// Keeps the language in the `[general]` section of `settings.toml`.
#[derive(Debug, Clone)]
pub struct ConfigPreferenceStore {
    path: PathBuf,
}

impl ConfigPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for ConfigPreferenceStore {
    fn load(&self) -> Option<String> {
        config::load_from_path(&self.path)
            .ok()
            .and_then(|config| config.general.language)
    }

    fn save(&mut self, code: &str) -> Result<()> {
        let mut config = if self.path.exists() {
            config::load_from_path(&self.path)?
        } else {
            config::Config::default()
        };
        if config.general.language.as_deref() == Some(code) {
            return Ok(());
        }
        config.general.language = Some(code.to_string());
        config::save_to_path(&config, &self.path)
    }
}

/// In-memory store. Clones share the same slot, so a clone handed to a
/// second translator sees what the first one saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryPreferenceStore {
    pub fn with_code(code: &str) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(code.to_string()))),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn save(&mut self, code: &str) -> Result<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(code.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn config_store_round_trips_through_settings_file() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested").join("settings.toml");
        let mut store = ConfigPreferenceStore::new(&path);

        assert_eq!(store.load(), None);
        store.save("ar").expect("save should create the file");
        assert_eq!(ConfigPreferenceStore::new(&path).load().as_deref(), Some("ar"));
    }

    #[test]
    fn config_store_keeps_other_sections() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[render]\nsize = 512\n").expect("failed to write config");

        ConfigPreferenceStore::new(&path).save("en").expect("save");
        let config = config::load_from_path(&path).expect("load");
        assert_eq!(config.render.size, Some(512));
        assert_eq!(config.general.language.as_deref(), Some("en"));
    }

    #[test]
    fn memory_store_clones_share_state() {
        let mut store = MemoryPreferenceStore::default();
        let observer = store.clone();
        store.save("ar").expect("memory save never fails");
        assert_eq!(observer.load().as_deref(), Some("ar"));
    }
}
