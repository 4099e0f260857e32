use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::{Bounds, Canvas, ViewMode};
use crate::error::ConfigurationError;

const WEEK_VIEW_COLUMNS: usize = 4;
const WEEK_VIEW_ROWS: usize = 2;
const WEEK_VIEW_DAYS: usize = 7;

/// One day slot of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub bounds: Bounds,
    pub is_today: bool,
    pub is_red_day: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub mode: ViewMode,
    pub rows: usize,
    pub columns: usize,
    /// Row-major.
    pub cells: Vec<GridCell>,
}

impl Grid {
    pub fn today(&self) -> Option<&GridCell> {
        self.cells.iter().find(|c| c.is_today)
    }
}

pub struct GridLayout {
    canvas: Canvas,
}

impl GridLayout {
    pub fn new(canvas: Canvas) -> Result<Self, ConfigurationError> {
        Ok(Self {
            canvas: canvas.validate()?,
        })
    }

    pub fn build(
        &self,
        mode: ViewMode,
        reference: NaiveDate,
        today: NaiveDate,
        holidays: &BTreeSet<NaiveDate>,
    ) -> Grid {
        let (dates, rows, columns) = match mode {
            ViewMode::Month => {
                let weeks = month_weeks(reference.year(), reference.month());
                let rows = weeks.len();
                (weeks.into_iter().flatten().collect::<Vec<_>>(), rows, 7)
            }
            ViewMode::Week => {
                let dates = (0..WEEK_VIEW_DAYS as i64)
                    .map(|i| reference + Duration::days(i))
                    .collect();
                (dates, WEEK_VIEW_ROWS, WEEK_VIEW_COLUMNS)
            }
        };

        let xs = edges(self.canvas.x, self.canvas.width, columns);
        let ys = edges(self.canvas.y, self.canvas.height, rows);

        let cells = dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| {
                let (col, row) = (i % columns, i / columns);
                GridCell {
                    date,
                    bounds: Bounds::new(xs[col], ys[row], xs[col + 1] - xs[col], ys[row + 1] - ys[row]),
                    is_today: date == today,
                    is_red_day: is_red_day(date, holidays),
                }
            })
            .collect();

        Grid {
            mode,
            rows,
            columns,
            cells,
        }
    }
}

/// Sundays and listed holidays.
pub fn is_red_day(date: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> bool {
    date.weekday() == Weekday::Sun || holidays.contains(&date)
}

/// Monday-first weeks overlapping a month, padded with days of the neighbouring months.
pub fn month_weeks(year: i32, month: u32) -> Vec<[NaiveDate; 7]> {
    let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let last_day = first_day + Duration::days(days_in_month(year, month) as i64 - 1);

    let mut monday = first_day - Duration::days(first_day.weekday().num_days_from_monday() as i64);
    let mut weeks = Vec::new();
    while monday <= last_day {
        weeks.push(std::array::from_fn(|i| monday + Duration::days(i as i64)));
        monday += Duration::weeks(1);
    }
    weeks
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (next, NaiveDate::from_ymd_opt(year, month, 1)) {
        (Some(next), Some(first)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

/// `n + 1` integer edges splitting `extent` evenly; consecutive differences sum to `extent`.
fn edges(origin: i32, extent: i32, n: usize) -> Vec<i32> {
    let n = n.max(1) as i64;
    (0..=n)
        .map(|i| origin + (i * extent as i64 / n) as i32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(grid: &Grid, index: usize) -> &[GridCell] {
        let start = (index * grid.columns).min(grid.cells.len());
        let end = (start + grid.columns).min(grid.cells.len());
        &grid.cells[start..end]
    }

    fn layout() -> GridLayout {
        GridLayout::new(Canvas::new(20, 65, 760, 395)).unwrap()
    }

    #[test]
    fn month_grid_has_four_to_six_monday_first_weeks() {
        // February 2027 starts on a Monday and has exactly four weeks.
        assert_eq!(month_weeks(2027, 2).len(), 4);
        assert_eq!(month_weeks(2026, 10).len(), 5);
        // August 2026 starts on a Saturday.
        assert_eq!(month_weeks(2026, 8).len(), 6);

        let weeks = month_weeks(2026, 10);
        assert_eq!(weeks[0][0], date(2026, 9, 28));
        assert_eq!(weeks[0][0].weekday(), Weekday::Mon);
        assert_eq!(weeks[4][6], date(2026, 11, 1));
    }

    #[test]
    fn rows_and_columns_cover_the_canvas_exactly() {
        let holidays = BTreeSet::new();
        for (mode, reference) in [
            (ViewMode::Month, date(2026, 8, 10)),
            (ViewMode::Month, date(2027, 2, 1)),
            (ViewMode::Week, date(2026, 10, 15)),
        ] {
            let grid = layout().build(mode, reference, reference, &holidays);
            for r in 0..grid.rows {
                let cells = row(&grid, r);
                let width: i32 = cells.iter().map(|c| c.bounds.w).sum();
                let expected = if cells.len() == grid.columns { 760 } else { width };
                assert_eq!(width, expected);
            }
            let height: i32 = (0..grid.rows).map(|r| row(&grid, r)[0].bounds.h).sum();
            assert_eq!(height, 395);
        }
    }

    #[test]
    fn month_cells_are_a_seventh_of_the_width() {
        let grid = layout().build(ViewMode::Month, date(2026, 10, 15), date(2026, 10, 15), &BTreeSet::new());
        assert_eq!(grid.columns, 7);
        assert_eq!(grid.rows, 5);
        assert_eq!(grid.cells.len(), 35);
        for cell in &grid.cells {
            assert!((cell.bounds.w - 760 / 7).abs() <= 1);
            assert_eq!(cell.bounds.h, 79);
        }
        assert_eq!(grid.cells[0].bounds.x, 20);
        assert_eq!(grid.cells[0].bounds.y, 65);
    }

    #[test]
    fn exactly_one_today_cell_when_visible() {
        let today = date(2026, 10, 15);
        let grid = layout().build(ViewMode::Month, today, today, &BTreeSet::new());
        assert_eq!(grid.cells.iter().filter(|c| c.is_today).count(), 1);
        assert_eq!(grid.today().map(|c| c.date), Some(today));

        // Lead days of the previous month are visible too.
        let lead = date(2026, 9, 29);
        let grid = layout().build(ViewMode::Month, today, lead, &BTreeSet::new());
        assert_eq!(grid.cells.iter().filter(|c| c.is_today).count(), 1);

        let grid = layout().build(ViewMode::Month, today, date(2026, 12, 24), &BTreeSet::new());
        assert!(grid.today().is_none());
    }

    #[test]
    fn week_grid_is_four_by_two_from_reference() {
        let start = date(2026, 10, 15);
        let grid = layout().build(ViewMode::Week, start, start, &BTreeSet::new());
        assert_eq!((grid.columns, grid.rows), (4, 2));
        assert_eq!(grid.cells.len(), 7);
        assert_eq!(grid.cells[0].date, start);
        assert_eq!(grid.cells[6].date, date(2026, 10, 21));
        assert_eq!(grid.cells[0].bounds, Bounds::new(20, 65, 190, 197));
        assert_eq!(grid.cells[4].bounds.y, 65 + 197);
        assert_eq!(grid.cells[4].bounds.x, 20);
        assert!(grid.cells[0].is_today);
    }

    #[test]
    fn sundays_and_holidays_are_red() {
        let holidays = BTreeSet::from([date(2026, 12, 25)]);
        assert!(is_red_day(date(2026, 10, 18), &holidays));
        assert!(is_red_day(date(2026, 12, 25), &holidays));
        assert!(!is_red_day(date(2026, 10, 17), &holidays));
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        assert!(GridLayout::new(Canvas::new(0, 0, 0, 100)).is_err());
        assert!(GridLayout::new(Canvas::new(0, 0, 100, -5)).is_err());
    }
}
