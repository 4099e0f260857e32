use std::fmt;
use std::path::PathBuf;

/// Invalid canvas, mode, profile or cap. Aborts the render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    InvalidCanvas { width: i32, height: i32 },
    UnknownMode(String),
    UnknownProfile(String),
    ZeroMaxEvents,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::InvalidCanvas { width, height } => {
                write!(f, "canvas must have a positive size, got {}x{}", width, height)
            }
            ConfigurationError::UnknownMode(mode) => {
                write!(f, "unknown draw option {:?}, expected \"month\" or \"week\"", mode)
            }
            ConfigurationError::UnknownProfile(name) => {
                write!(
                    f,
                    "unknown display profile {:?}, expected \"inky-impression\", \"tricolor\" or \"mono\"",
                    name
                )
            }
            ConfigurationError::ZeroMaxEvents => {
                write!(f, "max_events_per_cell must be at least 1")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// A single label could not be measured. Only that event is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasurementError {
    EmptySummary,
    UnsupportedGlyph(char),
}

impl fmt::Display for MeasurementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementError::EmptySummary => write!(f, "event has an empty summary"),
            MeasurementError::UnsupportedGlyph(c) => {
                write!(f, "font has no glyph for {:?}", c)
            }
        }
    }
}

impl std::error::Error for MeasurementError {}

/// A calendar feed could not be read. The feed contributes no events.
#[derive(Debug)]
pub enum DataSourceError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    InvalidDate { path: PathBuf, value: String },
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            DataSourceError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            DataSourceError::InvalidDate { path, value } => {
                write!(f, "invalid date {:?} in {}", value, path.display())
            }
        }
    }
}

impl std::error::Error for DataSourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataSourceError::Io { source, .. } => Some(source),
            DataSourceError::Parse { source, .. } => Some(source),
            DataSourceError::InvalidDate { .. } => None,
        }
    }
}
