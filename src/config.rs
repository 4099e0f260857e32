use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde::Deserialize;

use crate::calendar::Feed;
use crate::error::ConfigurationError;
use crate::layout::{Canvas, ViewMode};
use crate::profile::DisplayProfile;
use crate::render::cell::DEFAULT_MAX_EVENTS;
use crate::theme::{Theme, ThemeConfig};

const APP_DIR: &str = "epaper-calendar";

/// Optional per-mode canvas overrides. Missing ones derive from the profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CanvasConfig {
    pub month: Option<Canvas>,
    pub week: Option<Canvas>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub profile: String,
    pub max_events_per_cell: usize,
    /// `YYYY-MM-DD` dates drawn as red days.
    pub holidays: Vec<String>,
    pub canvas: CanvasConfig,
    pub theme: ThemeConfig,
    pub feeds: Vec<Feed>,
    /// Directory relative feed paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: "inky-impression".to_string(),
            max_events_per_cell: DEFAULT_MAX_EVENTS,
            holidays: Vec::new(),
            canvas: CanvasConfig::default(),
            theme: ThemeConfig::default(),
            feeds: Vec::new(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Read the given file, or the default location if none was given.
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::info!("no config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let config = Self::parse(&content, base_dir)
            .wrap_err_with(|| format!("invalid config {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str, base_dir: PathBuf) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.base_dir = base_dir;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.max_events_per_cell == 0 {
            return Err(ConfigurationError::ZeroMaxEvents);
        }
        let profile = self.display_profile()?;
        for mode in [ViewMode::Month, ViewMode::Week] {
            self.canvas(mode, &profile).validate()?;
        }
        Ok(())
    }

    pub fn display_profile(&self) -> Result<DisplayProfile, ConfigurationError> {
        DisplayProfile::named(&self.profile)
            .ok_or_else(|| ConfigurationError::UnknownProfile(self.profile.clone()))
    }

    pub fn canvas(&self, mode: ViewMode, profile: &DisplayProfile) -> Canvas {
        match mode {
            ViewMode::Month => self.canvas.month.unwrap_or_else(|| profile.month_canvas()),
            ViewMode::Week => self.canvas.week.unwrap_or_else(|| profile.week_canvas()),
        }
    }

    /// Theme with every color snapped to the panel palette.
    pub fn theme(&self, profile: &DisplayProfile) -> Theme {
        self.theme.clone().into_theme().snapped(profile)
    }

    /// Configured holiday dates. Unparseable entries are logged and dropped.
    pub fn holidays(&self) -> BTreeSet<NaiveDate> {
        self.holidays
            .iter()
            .filter_map(|value| match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(err) => {
                    log::warn!("ignoring holiday {:?}: {}", value, err);
                    None
                }
            })
            .collect()
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

pub fn default_state_path() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR).join("state.toml"))
        .ok_or_else(|| eyre!("no local data directory, pass --state"))
}
