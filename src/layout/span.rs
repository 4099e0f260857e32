use std::fmt;

use chrono::NaiveDate;

use crate::calendar::ColoredEvent;

/// Which fragment of a multi-day event a cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiDaySpan {
    pub day_index: u32,
    pub total_days: u32,
}

impl fmt::Display for MultiDaySpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}/{})", self.day_index, self.total_days)
    }
}

/// An event shown on one date. `span` is set for multi-day events only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayEntry<'a> {
    pub event: &'a ColoredEvent,
    pub span: Option<MultiDaySpan>,
}

/// Events covering `date`: multi-day spans first, then single-day events by start time.
pub fn events_for_day(events: &[ColoredEvent], date: NaiveDate) -> Vec<DayEntry<'_>> {
    let mut multi_day = Vec::new();
    let mut single_day = Vec::new();

    for colored in events.iter().filter(|e| e.event.covers(date)) {
        let event = &colored.event;
        if event.is_multi_day() {
            let span = MultiDaySpan {
                day_index: (date - event.first_day()).num_days() as u32 + 1,
                total_days: event.total_days(),
            };
            multi_day.push(DayEntry {
                event: colored,
                span: Some(span),
            });
        } else {
            single_day.push(DayEntry {
                event: colored,
                span: None,
            });
        }
    }

    multi_day.sort_by_key(|e| (e.event.event.start, e.event.event.end));
    single_day.sort_by_key(|e| e.event.event.start);

    multi_day.extend(single_day);
    multi_day
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDateTime};

    use super::*;
    use crate::calendar::event::CalendarEvent;
    use crate::theme::{BLACK, GREEN};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn at(d: u32, h: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn timed(summary: &str, start: NaiveDateTime, end: NaiveDateTime) -> ColoredEvent {
        ColoredEvent::new(CalendarEvent::timed(summary, start, end), BLACK)
    }

    fn summaries(entries: &[DayEntry]) -> Vec<String> {
        entries.iter().map(|e| e.event.event.summary.clone()).collect()
    }

    #[test]
    fn multi_day_first_then_chronological() {
        let events = vec![
            timed("A", at(15, 10), at(15, 11)),
            timed("B", at(15, 9), at(15, 10)),
            ColoredEvent::new(CalendarEvent::all_day("C", day(14), day(16)), GREEN),
        ];
        let entries = events_for_day(&events, day(15));
        assert_eq!(summaries(&entries), ["C", "B", "A"]);
        assert_eq!(
            entries[0].span,
            Some(MultiDaySpan {
                day_index: 2,
                total_days: 3
            })
        );
        assert_eq!(entries[1].span, None);
    }

    #[test]
    fn day_index_visits_each_value_once() {
        let events = vec![timed("Conference", at(12, 9), at(16, 17))];
        let indices: Vec<u32> = (10..20)
            .flat_map(|d| events_for_day(&events, day(d)))
            .map(|e| e.span.unwrap().day_index)
            .collect();
        assert_eq!(indices, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn each_event_lands_in_exactly_one_bucket() {
        let events = vec![
            timed("Trip", at(14, 8), at(16, 20)),
            timed("Dentist", at(15, 8), at(15, 9)),
            timed("Yesterday", at(14, 8), at(14, 9)),
        ];
        let entries = events_for_day(&events, day(15));
        assert_eq!(summaries(&entries), ["Trip", "Dentist"]);
        assert!(entries[0].span.is_some());
        assert!(entries[1].span.is_none());
    }

    #[test]
    fn equal_start_times_keep_input_order() {
        let events = vec![
            timed("First", at(15, 9), at(15, 10)),
            timed("Second", at(15, 9), at(15, 10)),
            timed("Third", at(15, 9), at(15, 10) + Duration::minutes(30)),
        ];
        let entries = events_for_day(&events, day(15));
        assert_eq!(summaries(&entries), ["First", "Second", "Third"]);
    }

    #[test]
    fn no_events_gives_empty_day() {
        assert!(events_for_day(&[], day(15)).is_empty());
    }

    #[test]
    fn span_suffix_format() {
        let span = MultiDaySpan {
            day_index: 1,
            total_days: 3,
        };
        assert_eq!(span.to_string(), "(1/3)");
    }
}
