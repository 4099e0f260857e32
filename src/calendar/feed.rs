use std::path::PathBuf;

use serde::Deserialize;

/// A calendar source and the color its events are drawn in.
#[derive(Debug, Clone, Deserialize)]
pub struct Feed {
    pub name: String,
    pub color: String,
    pub path: PathBuf,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// All-day events of this feed mark red days.
    #[serde(default)]
    pub holidays: bool,
}

fn default_enabled() -> bool {
    true
}
