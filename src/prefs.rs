use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PREFS_PATH: &str = "finlite-prefs.json";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to write preference store: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    theme: Option<Theme>,
}

/// JSON-file key-value store for display preferences. Reads tolerate a
/// missing or corrupt file (falling back to defaults, like an absent browser
/// storage entry); writes replace the whole file, last-write-wins.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load_theme(&self) -> Theme {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str::<PrefsFile>(&raw).ok())
            .and_then(|prefs| prefs.theme)
            .unwrap_or(Theme::Dark)
    }

    pub fn save_theme(&self, theme: Theme) -> Result<(), PrefsError> {
        let encoded = serde_json::to_string_pretty(&PrefsFile { theme: Some(theme) })?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }
}

/// Shared application state: the active theme, loaded once at startup and
/// written back through the store on every toggle.
#[derive(Debug)]
pub struct AppState {
    theme: Mutex<Theme>,
    store: PrefsStore,
}

impl AppState {
    pub fn load(store: PrefsStore) -> Self {
        let theme = store.load_theme();
        Self {
            theme: Mutex::new(theme),
            store,
        }
    }

    pub fn theme(&self) -> Theme {
        *self.theme.lock().expect("theme lock poisoned")
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), PrefsError> {
        self.store.save_theme(theme)?;
        *self.theme.lock().expect("theme lock poisoned") = theme;
        Ok(())
    }
}
