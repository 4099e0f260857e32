use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

use super::event::{CalendarEvent, ColoredEvent};
use super::feed::Feed;
use crate::error::DataSourceError;
use crate::profile::DisplayProfile;
use crate::theme;

/// Everything read from the enabled feeds.
#[derive(Debug, Default)]
pub struct Loaded {
    pub events: Vec<ColoredEvent>,
    /// Days covered by all-day events of holiday feeds.
    pub holidays: BTreeSet<NaiveDate>,
}

/// Reads already-parsed event snapshots, one TOML file per feed.
pub struct Store {
    feeds: Vec<Feed>,
    base_dir: PathBuf,
}

impl Store {
    pub fn new(feeds: Vec<Feed>, base_dir: PathBuf) -> Self {
        Self { feeds, base_dir }
    }

    pub fn feeds(&self) -> &[Feed] {
        &self.feeds
    }

    /// Load every enabled feed. A feed that fails is logged and skipped.
    pub fn load(&self, profile: &DisplayProfile) -> Loaded {
        let mut loaded = Loaded::default();

        for feed in self.feeds.iter().filter(|f| f.enabled) {
            let color = match theme::parse_color(&feed.color) {
                Some(c) => profile.snap(c),
                None => {
                    log::warn!("feed {:?} has unknown color {:?}, using black", feed.name, feed.color);
                    profile.snap(theme::BLACK)
                }
            };

            let path = self.resolve(&feed.path);
            let events = match load_snapshot(&path) {
                Ok(events) => events,
                Err(err) => {
                    log::warn!("skipping feed {:?}: {}", feed.name, err);
                    continue;
                }
            };
            log::debug!("feed {:?}: {} events", feed.name, events.len());

            if feed.holidays {
                for event in events.iter().filter(|e| e.is_all_day) {
                    let mut day = event.first_day();
                    while day <= event.last_day() {
                        loaded.holidays.insert(day);
                        day += Duration::days(1);
                    }
                }
            }

            loaded
                .events
                .extend(events.into_iter().map(|e| ColoredEvent::new(e, color)));
        }

        loaded
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

// ── TOML snapshot types ──

#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    summary: String,
    start: toml::Value,
    end: Option<toml::Value>,
    all_day: Option<bool>,
}

pub fn load_snapshot(path: &Path) -> Result<Vec<CalendarEvent>, DataSourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_snapshot(&content, path)
}

fn parse_snapshot(content: &str, path: &Path) -> Result<Vec<CalendarEvent>, DataSourceError> {
    let snapshot: Snapshot = toml::from_str(content).map_err(|source| DataSourceError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    snapshot
        .events
        .into_iter()
        .map(|raw| convert_event(raw, path))
        .collect()
}

fn convert_event(raw: RawEvent, path: &Path) -> Result<CalendarEvent, DataSourceError> {
    let invalid = |value: String| DataSourceError::InvalidDate {
        path: path.to_path_buf(),
        value,
    };

    let start_text = value_text(&raw.start);
    let (start, start_is_date) = parse_instant(&start_text).ok_or_else(|| invalid(start_text))?;
    let is_all_day = raw.all_day.unwrap_or(start_is_date);

    let event = match raw.end {
        Some(value) => {
            let text = value_text(&value);
            let end = parse_instant(&text).ok_or_else(|| invalid(text))?.0;
            CalendarEvent {
                summary: raw.summary,
                start,
                end,
                is_all_day,
            }
        }
        None if is_all_day => CalendarEvent::all_day(&raw.summary, start.date(), start.date()),
        None => CalendarEvent::timed(&raw.summary, start, start),
    };
    Ok(event)
}

fn value_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Datetime(dt) => dt.to_string(),
        other => other.to_string(),
    }
}

/// Parse a date or date-time into local wall-clock time. The flag is set for date-only values.
fn parse_instant(s: &str) -> Option<(NaiveDateTime, bool)> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some((date.and_time(NaiveTime::MIN), true));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some((dt.with_timezone(&Local).naive_local(), false));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| (dt, false))
}
