use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use ratatui::style::Color;

/// One calendar entry in local wall-clock time.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub summary: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub is_all_day: bool,
}

impl CalendarEvent {
    pub fn timed(summary: &str, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            summary: summary.to_string(),
            start,
            end,
            is_all_day: false,
        }
    }

    /// All-day event covering `first..=last`.
    pub fn all_day(summary: &str, first: NaiveDate, last: NaiveDate) -> Self {
        let last = last.max(first);
        Self {
            summary: summary.to_string(),
            start: first.and_time(NaiveTime::MIN),
            end: (last + Duration::days(1)).and_time(NaiveTime::MIN),
            is_all_day: true,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    /// Last date the event covers. An end exactly at midnight is exclusive.
    pub fn last_day(&self) -> NaiveDate {
        let first = self.first_day();
        let last = if self.end > self.start && self.end.time() == NaiveTime::MIN {
            self.end.date().pred_opt().unwrap_or(first)
        } else {
            self.end.date()
        };
        last.max(first)
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.first_day() <= date && date <= self.last_day()
    }

    pub fn is_multi_day(&self) -> bool {
        self.first_day() != self.last_day()
    }

    pub fn total_days(&self) -> u32 {
        (self.last_day() - self.first_day()).num_days() as u32 + 1
    }
}

/// An event paired with the color of the feed it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ColoredEvent {
    pub event: CalendarEvent,
    pub color: Color,
}

impl ColoredEvent {
    pub fn new(event: CalendarEvent, color: Color) -> Self {
        Self { event, color }
    }
}
