use chrono::{Datelike, NaiveDate, Weekday};
use ratatui::style::Color;

use super::fit::{fit_label, wrap_label, Label};
use super::text::{Font, TextMeasurer, BODY, LARGE, SMALL, SYMBOL};
use super::{DrawCommand, Point};
use crate::calendar::ColoredEvent;
use crate::error::{ConfigurationError, MeasurementError};
use crate::layout::{events_for_day, Bounds, DayEntry, GridCell, ViewMode};
use crate::theme::Theme;

pub const DEFAULT_MAX_EVENTS: usize = 5;
const MAX_WRAP_LINES: usize = 4;
const LABEL_PADDING: i32 = 1;
const CORNER_RADIUS: i32 = 3;

/// Draw commands for one cell plus what happened to its events.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellRender {
    pub commands: Vec<DrawCommand>,
    pub shown: usize,
    /// Events hidden behind the "+N more" line.
    pub overflow: usize,
    /// Events dropped because their label could not be measured.
    pub skipped: usize,
}

struct CompactLine {
    bullet: &'static str,
    bullet_width: i32,
    text: String,
    text_width: i32,
    color: Color,
}

struct WideEvent {
    lines: Vec<String>,
    color: Color,
}

/// Lays one day's events into its cell.
pub struct DayCellRenderer<'a, M: TextMeasurer + ?Sized> {
    theme: &'a Theme,
    measurer: &'a M,
    max_events: usize,
}

impl<'a, M: TextMeasurer + ?Sized> DayCellRenderer<'a, M> {
    pub fn new(theme: &'a Theme, measurer: &'a M, max_events: usize) -> Result<Self, ConfigurationError> {
        if max_events == 0 {
            return Err(ConfigurationError::ZeroMaxEvents);
        }
        Ok(Self {
            theme,
            measurer,
            max_events,
        })
    }

    pub fn render(&self, cell: &GridCell, events: &[ColoredEvent], mode: ViewMode) -> CellRender {
        match mode {
            ViewMode::Month => self.render_compact(cell, events),
            ViewMode::Week => self.render_wide(cell, events),
        }
    }

    fn render_compact(&self, cell: &GridCell, events: &[ColoredEvent]) -> CellRender {
        let b = cell.bounds;
        let mut render = CellRender::default();
        render.commands.push(DrawCommand::outline(b, self.theme.lines, 1));

        let date_label = cell.date.format("%a %d").to_string();
        self.text_with_bg(
            &mut render.commands,
            &date_label,
            Point::new(b.x + 3, b.y + 3),
            BODY,
            self.date_color(cell),
            LABEL_PADDING,
        );

        if cell.date.weekday() == Weekday::Mon {
            let week_label = format!("W{}", cell.date.iso_week().week());
            let width = self.width_or_zero(&week_label, BODY);
            self.text_with_bg(
                &mut render.commands,
                &week_label,
                Point::new(b.right() - width - 5, b.y + 3),
                BODY,
                self.theme.week_number,
                LABEL_PADDING,
            );
        }

        let mut lines = Vec::new();
        for entry in events_for_day(events, cell.date) {
            match self.compact_line(&entry, b.w) {
                Ok(line) => lines.push(line),
                Err(err) => self.skip(&mut render, &entry, cell.date, err),
            }
        }

        let limit = self.limit(lines.len());
        let (free_rows, reserved_rows) = compact_rows(b.h);
        let shown = if limit == lines.len() && limit <= free_rows {
            limit
        } else {
            limit.min(reserved_rows)
        };
        for (i, line) in lines.iter().take(shown).enumerate() {
            let y = b.y + 3 + BODY.size * (i as i32 + 1);
            let x = b.x + 2;
            render.commands.push(DrawCommand::RoundedRect {
                bounds: Bounds::new(
                    x,
                    y,
                    (line.text_width + line.bullet_width).min(b.w - 3),
                    BODY.size + 1,
                ),
                radius: CORNER_RADIUS,
                fill: self.theme.label_bg,
            });
            render
                .commands
                .push(DrawCommand::text(Point::new(x, y - 2), line.bullet, SYMBOL, line.color));
            render.commands.push(DrawCommand::text(
                Point::new(x + line.bullet_width, y),
                line.text.clone(),
                BODY,
                self.theme.event_text,
            ));
        }

        render.shown = shown;
        render.overflow = lines.len() - shown;
        self.overflow_line(&mut render, b);
        render
    }

    fn render_wide(&self, cell: &GridCell, events: &[ColoredEvent]) -> CellRender {
        let b = cell.bounds;
        let mut render = CellRender::default();
        render.commands.push(DrawCommand::outline(b, self.theme.lines, 1));

        let date_label = wide_date_label(cell.date);
        let width = self.width_or_zero(&date_label, BODY);
        self.text_with_bg(
            &mut render.commands,
            &date_label,
            Point::new(b.x + b.w / 2 - width / 2, b.y + 3),
            BODY,
            self.date_color(cell),
            LABEL_PADDING,
        );

        let mut prepared = Vec::new();
        for entry in events_for_day(events, cell.date) {
            match self.wide_event(&entry, b.w) {
                Ok(event) => prepared.push(event),
                Err(err) => self.skip(&mut render, &entry, cell.date, err),
            }
        }

        // Row 0 is the date label; keep room for the overflow line at the bottom.
        let max_rows = ((b.h - 3 - SMALL.size - 2) / LARGE.size - 1).max(0) as usize;
        let limit = self.limit(prepared.len());
        let mut row = 0;
        for event in prepared.iter().take(limit) {
            if row + event.lines.len() > max_rows {
                break;
            }
            for line in &event.lines {
                row += 1;
                let y = b.y + 3 + LARGE.size * row as i32;
                let width = self.width_or_zero(line, LARGE);
                render.commands.push(DrawCommand::RoundedRect {
                    bounds: Bounds::new(b.x + 2, y, width, LARGE.size),
                    radius: CORNER_RADIUS,
                    fill: self.theme.label_bg,
                });
                render.commands.push(DrawCommand::text(
                    Point::new(b.x + 2, y),
                    line.clone(),
                    LARGE,
                    event.color,
                ));
            }
            render.shown += 1;
        }

        render.overflow = prepared.len() - render.shown;
        self.overflow_line(&mut render, b);
        render
    }

    fn compact_line(&self, entry: &DayEntry, cell_width: i32) -> Result<CompactLine, MeasurementError> {
        let label = event_label(entry, ViewMode::Month)?;
        let bullet = self.theme.bullet(entry.event.color);
        let bullet_width = self.measurer.text_width(bullet, SYMBOL)?;
        let text = fit_label(self.measurer, &label, BODY, cell_width - bullet_width - 4)?;
        let text_width = self.measurer.text_width(&text, BODY)?;
        Ok(CompactLine {
            bullet,
            bullet_width,
            text,
            text_width,
            color: entry.event.color,
        })
    }

    fn wide_event(&self, entry: &DayEntry, cell_width: i32) -> Result<WideEvent, MeasurementError> {
        let mut label = event_label(entry, ViewMode::Week)?;
        label.prefix = format!("{} {}", self.theme.bullet(entry.event.color), label.prefix);
        let lines = wrap_label(self.measurer, &label, LARGE, cell_width - 4, MAX_WRAP_LINES)?;
        Ok(WideEvent {
            lines,
            color: entry.event.color,
        })
    }

    /// Number of events drawn before the overflow line takes the last slot.
    fn limit(&self, total: usize) -> usize {
        if total > self.max_events {
            self.max_events - 1
        } else {
            total
        }
    }

    fn overflow_line(&self, render: &mut CellRender, b: Bounds) {
        if render.overflow == 0 {
            return;
        }
        let text = format!("+{} more", render.overflow);
        self.text_with_bg(
            &mut render.commands,
            &text,
            Point::new(b.x + 2, b.bottom() - SMALL.size - 2),
            SMALL,
            self.theme.lines,
            0,
        );
    }

    fn skip(&self, render: &mut CellRender, entry: &DayEntry, date: NaiveDate, err: MeasurementError) {
        log::warn!(
            "skipping event {:?} on {}: {}",
            entry.event.event.summary,
            date,
            err
        );
        render.skipped += 1;
    }

    fn date_color(&self, cell: &GridCell) -> Color {
        if cell.is_red_day {
            self.theme.red_day
        } else {
            self.theme.weekday
        }
    }

    fn width_or_zero(&self, text: &str, font: Font) -> i32 {
        self.measurer.text_width(text, font).unwrap_or_else(|err| {
            log::warn!("cannot measure {:?}: {}", text, err);
            0
        })
    }

    /// Text on a rounded box of the label background color.
    fn text_with_bg(
        &self,
        commands: &mut Vec<DrawCommand>,
        text: &str,
        at: Point,
        font: Font,
        color: Color,
        padding: i32,
    ) {
        let width = self.width_or_zero(text, font);
        commands.push(DrawCommand::RoundedRect {
            bounds: Bounds::new(at.x, at.y, width + padding * 2, font.size + padding * 2),
            radius: CORNER_RADIUS,
            fill: self.theme.label_bg,
        });
        commands.push(DrawCommand::text(
            Point::new(at.x + padding, at.y + padding),
            text,
            font,
            color,
        ));
    }
}

/// All-day: summary. Timed: start hour first, with minutes in the wide layout.
/// Multi-day: summary and day fraction.
fn event_label(entry: &DayEntry, mode: ViewMode) -> Result<Label, MeasurementError> {
    let event = &entry.event.event;
    let summary = event.summary.trim();
    if summary.is_empty() {
        return Err(MeasurementError::EmptySummary);
    }

    let prefix = if entry.span.is_some() || event.is_all_day {
        String::new()
    } else {
        match mode {
            ViewMode::Month => event.start.format("%H ").to_string(),
            ViewMode::Week => event.start.format("%H:%M ").to_string(),
        }
    };

    Ok(Label {
        prefix,
        summary: summary.to_string(),
        suffix: entry.span.map(|s| s.to_string()),
    })
}

/// Event rows that fit a compact cell of height `h`: with the whole cell free, and with the
/// bottom kept for the overflow line.
fn compact_rows(h: i32) -> (usize, usize) {
    let row = |room: i32| (room / BODY.size).max(0) as usize;
    let first_row = 3 + BODY.size;
    let label_height = BODY.size + 1;
    let free = row(h - first_row - label_height + BODY.size);
    let reserved = row(h - first_row - label_height + BODY.size - SMALL.size - 2);
    (free, reserved)
}

fn wide_date_label(date: NaiveDate) -> String {
    if date.day() == 13 && date.weekday() == Weekday::Fri {
        return format!("Friday the 13th of {}", date.format("%B"));
    }
    date.format("%A %-d %B").to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{Duration, NaiveDateTime};

    use super::*;
    use crate::calendar::event::CalendarEvent;
    use crate::layout::{Canvas, GridLayout};
    use crate::render::text::FixedAdvance;
    use crate::theme::{BLUE, GREEN, RED};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn at(d: u32, h: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn cell(d: u32, bounds: Bounds) -> GridCell {
        GridCell {
            date: day(d),
            bounds,
            is_today: false,
            is_red_day: day(d).weekday() == Weekday::Sun,
        }
    }

    fn month_cell(d: u32) -> GridCell {
        cell(d, Bounds::new(20, 65, 108, 79))
    }

    fn timed(summary: &str, h: u32, color: Color) -> ColoredEvent {
        ColoredEvent::new(CalendarEvent::timed(summary, at(15, h), at(15, h + 1)), color)
    }

    /// Text of every event row, top to bottom.
    fn event_texts(render: &CellRender, cell: &GridCell, font: Font) -> Vec<String> {
        render
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text {
                    text,
                    font: f,
                    position,
                    ..
                } if *f == font && position.y >= cell.bounds.y + 3 + font.size => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Box a command paints, for anchor-left text measured with `FixedAdvance`.
    fn covered(command: &DrawCommand) -> Bounds {
        match command {
            DrawCommand::Rect { bounds, .. } | DrawCommand::RoundedRect { bounds, .. } => *bounds,
            DrawCommand::Text {
                position, text, font, ..
            } => Bounds::new(
                position.x,
                position.y,
                FixedAdvance.text_width(text, *font).unwrap(),
                font.size,
            ),
        }
    }

    fn inside(outer: Bounds, inner: Bounds) -> bool {
        inner.x >= outer.x && inner.y >= outer.y && inner.right() <= outer.right() && inner.bottom() <= outer.bottom()
    }

    /// `count` hour-long events on `date`, plus a three-day event around it.
    fn busy_day(date: NaiveDate, count: u32) -> Vec<ColoredEvent> {
        let mut events: Vec<_> = (0..count)
            .map(|i| {
                let start = date.and_hms_opt(8 + i, 0, 0).unwrap();
                ColoredEvent::new(
                    CalendarEvent::timed("Quarterly planning with the whole team", start, start + Duration::hours(1)),
                    BLUE,
                )
            })
            .collect();
        events.push(ColoredEvent::new(
            CalendarEvent::all_day("Conference in Gothenburg", date - Duration::days(1), date + Duration::days(1)),
            GREEN,
        ));
        events
    }

    fn month_grid(reference: NaiveDate) -> crate::layout::grid::Grid {
        GridLayout::new(Canvas::new(20, 65, 760, 395))
            .unwrap()
            .build(ViewMode::Month, reference, reference, &BTreeSet::new())
    }

    fn renderer<'a>(theme: &'a Theme, max_events: usize) -> DayCellRenderer<'a, FixedAdvance> {
        DayCellRenderer::new(theme, &FixedAdvance, max_events).unwrap()
    }

    #[test]
    fn empty_day_has_only_chrome() {
        let theme = Theme::default();
        let cell = month_cell(15);
        let render = renderer(&theme, 5).render(&cell, &[], ViewMode::Month);

        assert_eq!(render.commands.len(), 3);
        assert_eq!(render.commands[2].text_str(), Some("Thu 15"));
        assert_eq!((render.shown, render.overflow, render.skipped), (0, 0, 0));
        assert!(render.commands.iter().all(|c| c.text_str().map_or(true, |t| !t.contains("more"))));
    }

    #[test]
    fn seven_events_with_cap_five_show_four_and_overflow() {
        let theme = Theme::default();
        let cell = month_cell(15);
        let events: Vec<_> = (0..7).map(|i| timed(&format!("E{}", i), 8 + i, BLUE)).collect();
        let render = renderer(&theme, 5).render(&cell, &events, ViewMode::Month);

        assert_eq!(render.shown, 4);
        assert_eq!(render.overflow, 3);
        assert_eq!(event_texts(&render, &cell, BODY), ["08 E0", "09 E1", "10 E2", "11 E3"]);
        let more: Vec<_> = render
            .commands
            .iter()
            .filter_map(|c| c.text_str())
            .filter(|t| t.contains("more"))
            .collect();
        assert_eq!(more, ["+3 more"]);
    }

    #[test]
    fn exactly_max_events_needs_no_overflow() {
        let theme = Theme::default();
        let cell = month_cell(15);
        let events: Vec<_> = (0..5).map(|i| timed("Slot", 8 + i, BLUE)).collect();
        let render = renderer(&theme, 5).render(&cell, &events, ViewMode::Month);
        assert_eq!((render.shown, render.overflow), (5, 0));
    }

    #[test]
    fn six_week_months_keep_rows_above_the_overflow_line() {
        let theme = Theme::default();
        let date = NaiveDate::from_ymd_opt(2026, 8, 12).unwrap();
        let grid = month_grid(date);
        assert_eq!(grid.rows, 6);
        let cell = grid.cells.iter().find(|c| c.date == date).unwrap();
        assert_eq!(cell.bounds.h, 66);

        for count in [5, 6] {
            let events: Vec<_> = (0..count)
                .map(|i| {
                    let start = date.and_hms_opt(8 + i, 0, 0).unwrap();
                    ColoredEvent::new(CalendarEvent::timed("Ev", start, start + Duration::hours(1)), BLUE)
                })
                .collect();
            let render = renderer(&theme, 5).render(cell, &events, ViewMode::Month);
            assert_eq!((render.shown, render.overflow), (3, count as usize - 3));

            let overflow_top = cell.bounds.bottom() - SMALL.size - 2;
            let rows: Vec<Bounds> = render
                .commands
                .iter()
                .filter_map(|c| match c {
                    DrawCommand::RoundedRect { bounds, .. } if bounds.h == BODY.size + 1 => Some(*bounds),
                    _ => None,
                })
                .collect();
            assert_eq!(rows.len(), 3);
            for row in rows {
                assert!(row.bottom() <= overflow_top, "{:?} runs into the overflow line", row);
            }
            for command in &render.commands {
                assert!(inside(cell.bounds, covered(command)), "{}", command);
            }
        }
    }

    #[test]
    fn month_cells_draw_only_inside_their_bounds() {
        let theme = Theme::default();
        let months = [
            (NaiveDate::from_ymd_opt(2027, 2, 10).unwrap(), 4),
            (NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(), 5),
            (NaiveDate::from_ymd_opt(2026, 8, 12).unwrap(), 6),
        ];
        for (reference, rows) in months {
            let grid = month_grid(reference);
            assert_eq!(grid.rows, rows);
            for cell in &grid.cells {
                let events = busy_day(cell.date, cell.date.day() % 9);
                let render = renderer(&theme, 5).render(cell, &events, ViewMode::Month);
                assert_eq!(render.shown + render.overflow, events.len());
                for command in &render.commands {
                    assert!(
                        inside(cell.bounds, covered(command)),
                        "{} in {:?}: {}",
                        cell.date,
                        cell.bounds,
                        command
                    );
                }
            }
        }
    }

    #[test]
    fn multi_day_first_then_chronological() {
        let theme = Theme::default();
        let cell = month_cell(15);
        let events = vec![
            timed("A", 10, BLUE),
            timed("B", 9, BLUE),
            ColoredEvent::new(CalendarEvent::all_day("C", day(14), day(16)), GREEN),
        ];
        let render = renderer(&theme, 5).render(&cell, &events, ViewMode::Month);
        assert_eq!(event_texts(&render, &cell, BODY), ["C (2/3)", "09 B", "10 A"]);
    }

    #[test]
    fn bullets_follow_feed_color() {
        let theme = Theme::default();
        let cell = month_cell(15);
        let events = vec![timed("Gym", 7, GREEN), timed("Date", 8, RED), timed("Work", 9, BLUE)];
        let render = renderer(&theme, 5).render(&cell, &events, ViewMode::Month);
        let bullets: Vec<(String, Color)> = render
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text {
                    text, font, color, ..
                } if *font == SYMBOL => Some((text.clone(), *color)),
                _ => None,
            })
            .collect();
        assert_eq!(
            bullets,
            [
                ("\u{2605}".to_string(), GREEN),
                ("\u{2764}".to_string(), RED),
                ("*".to_string(), BLUE)
            ]
        );
    }

    #[test]
    fn long_summaries_are_truncated_to_the_cell() {
        let theme = Theme::default();
        let cell = month_cell(15);
        let events = vec![timed("Quarterly planning with the whole team", 13, BLUE)];
        let render = renderer(&theme, 5).render(&cell, &events, ViewMode::Month);
        let texts = event_texts(&render, &cell, BODY);
        // 108px cell, 8px bullet, 4px margin: 12 glyphs.
        assert_eq!(texts, ["13 Quarterl\u{2026}"]);
    }

    #[test]
    fn unmeasurable_events_are_skipped_in_isolation() {
        let theme = Theme::default();
        let cell = month_cell(15);
        let events = vec![
            timed("   ", 8, BLUE),
            timed("Bell\u{7}", 9, BLUE),
            timed("Lunch", 12, BLUE),
        ];
        let render = renderer(&theme, 5).render(&cell, &events, ViewMode::Month);
        assert_eq!(render.skipped, 2);
        assert_eq!((render.shown, render.overflow), (1, 0));
        assert_eq!(event_texts(&render, &cell, BODY), ["12 Lunch"]);
    }

    #[test]
    fn mondays_show_the_week_number_and_sundays_are_red() {
        let theme = Theme::default();

        let monday = month_cell(12);
        let render = renderer(&theme, 5).render(&monday, &[], ViewMode::Month);
        assert!(render.commands.iter().any(|c| c.text_str() == Some("W42")));

        let sunday = month_cell(18);
        let render = renderer(&theme, 5).render(&sunday, &[], ViewMode::Month);
        let date_color = render.commands.iter().find_map(|c| match c {
            DrawCommand::Text { text, color, .. } if text == "Sun 18" => Some(*color),
            _ => None,
        });
        assert_eq!(date_color, Some(theme.red_day));
    }

    #[test]
    fn wide_layout_shows_minutes_and_wraps() {
        let theme = Theme::default();
        let cell = cell(15, Bounds::new(20, 20, 190, 220));
        let events = vec![
            ColoredEvent::new(
                CalendarEvent::timed("Dentist", at(15, 9), at(15, 10)),
                BLUE,
            ),
            ColoredEvent::new(
                CalendarEvent::all_day("Parent school conference evening", day(15), day(15)),
                GREEN,
            ),
        ];
        let render = renderer(&theme, 5).render(&cell, &events, ViewMode::Week);

        // 186px of 13px glyphs: 14 columns per line.
        let lines = event_texts(&render, &cell, LARGE);
        assert!(lines.len() > 2);
        assert!(lines[0].starts_with("* 09:00"));
        for line in &lines {
            assert!(FixedAdvance.text_width(line, LARGE).unwrap() <= 186, "{:?}", line);
        }
        // Hyphenated lines rejoin without the hyphen.
        let joined = lines.iter().fold(String::new(), |acc, line| match acc.strip_suffix('-') {
            Some(head) => format!("{}{}", head, line),
            None if acc.is_empty() => line.clone(),
            None => format!("{} {}", acc, line),
        });
        assert_eq!(joined, "* 09:00 Dentist \u{2605} Parent school conference evening");
        assert_eq!(render.shown, 2);
        assert!(render
            .commands
            .iter()
            .any(|c| c.text_str() == Some("Thursday 15 October")));
    }

    #[test]
    fn wide_layout_stops_at_the_cell_bottom() {
        let theme = Theme::default();
        // Room for two rows of large text below the date label.
        let cell = cell(15, Bounds::new(0, 0, 190, 78));
        let events: Vec<_> = (0..4).map(|i| timed("Call", 8 + i, BLUE)).collect();
        let render = renderer(&theme, 10).render(&cell, &events, ViewMode::Week);
        assert_eq!((render.shown, render.overflow), (2, 2));
    }

    #[test]
    fn friday_the_thirteenth_is_called_out() {
        let friday = NaiveDate::from_ymd_opt(2026, 11, 13).unwrap();
        assert_eq!(wide_date_label(friday), "Friday the 13th of November");
        assert_eq!(wide_date_label(day(15)), "Thursday 15 October");
    }

    #[test]
    fn zero_cap_is_a_configuration_error() {
        let theme = Theme::default();
        assert!(matches!(
            DayCellRenderer::new(&theme, &FixedAdvance, 0),
            Err(ConfigurationError::ZeroMaxEvents)
        ));
    }
}
