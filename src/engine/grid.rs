//! Calendar grid: the ordered sequence of visible days.
//!
//! The grid is regenerated whenever the project window or the weekend flag
//! changes. Hidden weekend dates have no column; lookups for them snap
//! inward to the nearest visible day.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::model::DateWindow;

/// One visible column of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub is_today: bool,
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Every date from `start` to `end` inclusive, weekends dropped unless
/// `include_weekends`. Empty when `start > end`.
pub fn build_calendar(
    start: NaiveDate,
    end: NaiveDate,
    include_weekends: bool,
    today: NaiveDate,
) -> Vec<CalendarDay> {
    if start > end {
        return Vec::new();
    }
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| include_weekends || !is_weekend(*date))
        .map(|date| CalendarDay {
            date,
            is_weekend: is_weekend(date),
            is_today: date == today,
        })
        .collect()
}

/// The date range the chart covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ProjectWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Earliest start minus `pad_before` days to latest end plus `pad_after`.
    /// Falls back to a window around `today` when there is nothing to show.
    pub fn from_windows<I>(windows: I, today: NaiveDate, pad_before: i64, pad_after: i64) -> Self
    where
        I: IntoIterator<Item = DateWindow>,
    {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for w in windows {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(w.start), hi.max(w.end)),
                None => (w.start, w.end),
            });
        }
        let (lo, hi) = bounds.unwrap_or((today, today));
        Self {
            start: lo - Duration::days(pad_before),
            end: hi + Duration::days(pad_after),
        }
    }
}

/// The visible day sequence plus column lookups.
#[derive(Debug, Clone, Default)]
pub struct CalendarGrid {
    days: Vec<CalendarDay>,
}

impl CalendarGrid {
    pub fn build(window: ProjectWindow, include_weekends: bool, today: NaiveDate) -> Self {
        Self {
            days: build_calendar(window.start, window.end, include_weekends, today),
        }
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }

    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.days.get(index).map(|d| d.date)
    }

    /// Exact column of `date`, if it is visible.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.days.binary_search_by_key(&date, |d| d.date).ok()
    }

    /// First visible column on or after `date`.
    pub fn start_column(&self, date: NaiveDate) -> Option<usize> {
        let idx = self.days.partition_point(|d| d.date < date);
        (idx < self.days.len()).then_some(idx)
    }

    /// Last visible column on or before `date`.
    pub fn end_column(&self, date: NaiveDate) -> Option<usize> {
        let idx = self.days.partition_point(|d| d.date <= date);
        idx.checked_sub(1)
    }

    /// Visible columns covered by `window`, clamped to the grid.
    pub fn column_span(&self, window: DateWindow) -> Option<(usize, usize)> {
        let first = self.start_column(window.start)?;
        let last = self.end_column(window.end)?;
        (first <= last).then_some((first, last))
    }

    /// Number of visible days inside `window`.
    pub fn visible_days_in(&self, window: DateWindow) -> usize {
        self.column_span(window)
            .map(|(first, last)| last - first + 1)
            .unwrap_or(0)
    }

    /// Column for `date`, clamped into the grid. `None` only for an empty grid.
    pub fn nearest_index(&self, date: NaiveDate) -> Option<usize> {
        if self.days.is_empty() {
            return None;
        }
        Some(self.start_column(date).unwrap_or(self.days.len() - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_grid_covers_bounds_inclusive() {
        let today = d(2025, 1, 1);
        let cases = [
            (d(2025, 1, 1), d(2025, 1, 1)),
            (d(2025, 1, 6), d(2025, 1, 31)),
            (d(2024, 12, 30), d(2025, 3, 14)),
            (d(2024, 2, 26), d(2024, 3, 1)),
        ];
        for (start, end) in cases {
            for include_weekends in [true, false] {
                let days = build_calendar(start, end, include_weekends, today);
                // All case bounds are weekdays, so they survive the filter.
                assert_eq!(days.first().unwrap().date, start);
                assert_eq!(days.last().unwrap().date, end);
                assert!(days.windows(2).all(|w| w[0].date < w[1].date));
                assert!(days.iter().all(|c| c.date >= start && c.date <= end));
                if !include_weekends {
                    assert!(days.iter().all(|c| !c.is_weekend));
                }
            }
        }
    }

    #[test]
    fn test_grid_counts() {
        let today = d(2025, 1, 1);
        // 2025-01-06 is a Monday; two full weeks.
        let all = build_calendar(d(2025, 1, 6), d(2025, 1, 19), true, today);
        let weekdays = build_calendar(d(2025, 1, 6), d(2025, 1, 19), false, today);
        assert_eq!(all.len(), 14);
        assert_eq!(weekdays.len(), 10);
        assert_eq!(all.iter().filter(|c| c.is_weekend).count(), 4);
    }

    #[test]
    fn test_inverted_bounds_give_empty_grid() {
        assert!(build_calendar(d(2025, 2, 1), d(2025, 1, 1), true, d(2025, 1, 1)).is_empty());
    }

    #[test]
    fn test_today_flag() {
        let days = build_calendar(d(2025, 1, 1), d(2025, 1, 5), true, d(2025, 1, 3));
        let flagged: Vec<_> = days.iter().filter(|c| c.is_today).map(|c| c.date).collect();
        assert_eq!(flagged, vec![d(2025, 1, 3)]);
    }

    #[test]
    fn test_hidden_weekend_snaps_inward() {
        // Fri 2025-01-10 .. Mon 2025-01-13 without the weekend: [Fri, Mon]
        let grid = CalendarGrid::build(
            ProjectWindow::new(d(2025, 1, 10), d(2025, 1, 13)),
            false,
            d(2025, 1, 1),
        );
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.index_of(d(2025, 1, 11)), None);
        assert_eq!(grid.start_column(d(2025, 1, 11)), Some(1));
        assert_eq!(grid.end_column(d(2025, 1, 11)), Some(0));
        let weekend_only = DateWindow::new(d(2025, 1, 11), d(2025, 1, 12));
        assert_eq!(grid.visible_days_in(weekend_only), 0);
    }

    #[test]
    fn test_column_span_clamps_to_grid() {
        let grid = CalendarGrid::build(
            ProjectWindow::new(d(2025, 1, 10), d(2025, 1, 20)),
            true,
            d(2025, 1, 1),
        );
        let overhanging = DateWindow::new(d(2025, 1, 1), d(2025, 1, 12));
        assert_eq!(grid.column_span(overhanging), Some((0, 2)));
        let outside = DateWindow::new(d(2025, 2, 1), d(2025, 2, 3));
        assert_eq!(grid.column_span(outside), None);
        assert_eq!(grid.nearest_index(d(2025, 3, 1)), Some(10));
        assert_eq!(grid.nearest_index(d(2024, 3, 1)), Some(0));
    }

    #[test]
    fn test_window_from_items_pads() {
        let windows = vec![
            DateWindow::new(d(2025, 1, 10), d(2025, 1, 12)),
            DateWindow::new(d(2025, 1, 5), d(2025, 1, 8)),
        ];
        let w = ProjectWindow::from_windows(windows, d(2025, 6, 1), 7, 30);
        assert_eq!(w.start, d(2024, 12, 29));
        assert_eq!(w.end, d(2025, 2, 11));

        let empty = ProjectWindow::from_windows(Vec::new(), d(2025, 6, 1), 7, 30);
        assert_eq!(empty.start, d(2025, 5, 25));
        assert_eq!(empty.end, d(2025, 7, 1));
    }
}
