//! Persisted UI preferences.
//!
//! Exactly one value is persisted: whether the dark theme is on. It lives
//! under the key `darkMode` in a small JSON document.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Get/set contract for the theme preference.
///
/// `Ok(None)` from `load_dark_mode` means nothing has been stored yet.
pub trait PreferenceStore: Send {
    fn load_dark_mode(&self) -> anyhow::Result<Option<bool>>;
    fn save_dark_mode(&self, dark_mode: bool) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PreferencesFile {
    #[serde(rename = "darkMode", default, skip_serializing_if = "Option::is_none")]
    dark_mode: Option<bool>,
}

/// JSON file backed store, normally at `platform::preferences_path()`.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load_dark_mode(&self) -> anyhow::Result<Option<bool>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let prefs: PreferencesFile = serde_json::from_str(&content)?;
        Ok(prefs.dark_mode)
    }

    fn save_dark_mode(&self, dark_mode: bool) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let prefs = PreferencesFile {
            dark_mode: Some(dark_mode),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&prefs)?)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    dark_mode: Arc<Mutex<Option<bool>>>,
}

impl MemoryPreferenceStore {
    pub fn new(initial: Option<bool>) -> Self {
        Self {
            dark_mode: Arc::new(Mutex::new(initial)),
        }
    }

    pub fn get(&self) -> Option<bool> {
        self.dark_mode.lock().map(|g| *g).unwrap_or(None)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load_dark_mode(&self) -> anyhow::Result<Option<bool>> {
        let guard = self
            .dark_mode
            .lock()
            .map_err(|_| anyhow::anyhow!("preference store poisoned"))?;
        Ok(*guard)
    }

    fn save_dark_mode(&self, dark_mode: bool) -> anyhow::Result<()> {
        let mut guard = self
            .dark_mode
            .lock()
            .map_err(|_| anyhow::anyhow!("preference store poisoned"))?;
        *guard = Some(dark_mode);
        Ok(())
    }
}
