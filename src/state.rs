//! Preferences that survive restarts.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::layout::ViewMode;

/// Raw persisted preferences; values are checked when resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub draw_option: Option<String>,
}

impl Preferences {
    pub fn with_mode(mode: ViewMode) -> Self {
        Self {
            draw_option: Some(mode.as_str().to_string()),
        }
    }
}

/// Abstract preference persistence backend.
pub trait PreferenceStore {
    type Error: std::fmt::Display;

    /// `Ok(None)` when nothing has been stored yet.
    fn load(&mut self) -> Result<Option<Preferences>, Self::Error>;
    fn save(&mut self, preferences: &Preferences) -> Result<(), Self::Error>;
}

/// Stored draw option, or month. Anything other than a valid stored value is
/// rewritten as month.
pub fn resolve_draw_option<S: PreferenceStore>(store: &mut S) -> ViewMode {
    let stored = match store.load() {
        Ok(preferences) => preferences.and_then(|p| p.draw_option),
        Err(err) => {
            log::warn!("cannot read preferences: {}", err);
            None
        }
    };

    if let Some(Ok(mode)) = stored.as_deref().map(str::parse::<ViewMode>) {
        return mode;
    }

    match &stored {
        Some(value) => log::warn!("invalid draw option {:?}, resetting to month", value),
        None => log::info!("no draw option stored, using month"),
    }
    if let Err(err) = store.save(&Preferences::with_mode(ViewMode::Month)) {
        log::warn!("cannot write preferences: {}", err);
    }
    ViewMode::Month
}

pub fn store_draw_option<S: PreferenceStore>(store: &mut S, mode: ViewMode) -> Result<(), S::Error> {
    store.save(&Preferences::with_mode(mode))
}

/// TOML file holding the preferences.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for StateFile {
    type Error = io::Error;

    fn load(&mut self) -> io::Result<Option<Preferences>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        match toml::from_str(&content) {
            Ok(preferences) => Ok(Some(preferences)),
            Err(err) => {
                log::warn!("state file {} is malformed: {}", self.path.display(), err);
                Ok(None)
            }
        }
    }

    fn save(&mut self, preferences: &Preferences) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = toml::to_string(preferences).map_err(io::Error::other)?;
        std::fs::write(&self.path, content)
    }
}
