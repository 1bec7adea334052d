use super::grid::{DayCell, HeatmapGrid, InvalidYearError};
use super::summary::{current_streak, Summary};
use crate::records::ContributionLog;
use std::ops::Range;
use thiserror::Error;
use time::{Date, Duration, Month};

/// Everything the heatmap screen shows, plus the cursor and scroll position.
/// All changes go through the methods below.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HeatmapView {
    today: Date,
    log: ContributionLog,
    summary: Summary,
    grid: HeatmapGrid,
    cursor: Date,
    // Index of the leftmost week column drawn
    scroll: usize,
}

impl HeatmapView {
    pub(crate) fn new(
        log: ContributionLog,
        today: Date,
        year: i32,
    ) -> Result<HeatmapView, InvalidYearError> {
        let grid = HeatmapGrid::build(year, &log)?;
        let summary = Summary::of(&log);
        let cursor = default_cursor(&grid, today);
        Ok(HeatmapView {
            today,
            log,
            summary,
            grid,
            cursor,
            scroll: 0,
        })
    }

    pub(crate) fn grid(&self) -> &HeatmapGrid {
        &self.grid
    }

    pub(crate) fn summary(&self) -> &Summary {
        &self.summary
    }

    pub(crate) fn cursor(&self) -> Date {
        self.cursor
    }

    pub(crate) fn cursor_cell(&self) -> Option<&DayCell> {
        self.grid.cell(self.cursor)
    }

    pub(crate) fn current_streak(&self) -> usize {
        current_streak(&self.log, self.today)
    }

    /// Rebuild the grid for `year`.  The cursor keeps its place in the
    /// calendar where the new grid has room for it.  On error, nothing
    /// changes.
    pub(crate) fn set_year(&mut self, year: i32) -> Result<(), InvalidYearError> {
        let grid = HeatmapGrid::build(year, &self.log)?;
        let shifted = self.cursor.year() + (year - self.grid.year());
        self.cursor = self
            .cursor
            .replace_year(shifted)
            .or_else(|_| Date::from_calendar_date(shifted, Month::February, 28))
            .ok()
            .filter(|&d| grid.position(d).is_some())
            .unwrap_or_else(|| default_cursor(&grid, self.today));
        self.grid = grid;
        self.scroll = 0;
        tracing::debug!(year, cursor = %self.cursor, "changed heatmap year");
        Ok(())
    }

    pub(crate) fn previous_year(&mut self) -> Result<(), InvalidYearError> {
        self.set_year(self.grid.year() - 1)
    }

    pub(crate) fn next_year(&mut self) -> Result<(), InvalidYearError> {
        self.set_year(self.grid.year() + 1)
    }

    /// Move the cursor `days` days forwards (or backwards, if negative).  The
    /// cursor may not leave the grid.
    pub(crate) fn move_days(&mut self, days: i64) -> Result<(), OutOfGridError> {
        let target = self
            .cursor
            .checked_add(Duration::days(days))
            .filter(|&d| self.grid.position(d).is_some())
            .ok_or(OutOfGridError)?;
        self.cursor = target;
        Ok(())
    }

    pub(crate) fn jump_to_today(&mut self) -> Result<(), InvalidYearError> {
        if self.grid.year() != self.today.year() {
            self.set_year(self.today.year())?;
        }
        self.cursor = self.today;
        Ok(())
    }

    /// Returns the range of week columns to draw when only `week_qty` of them
    /// fit, scrolling as little as possible to keep the cursor's column in
    /// view
    pub(crate) fn visible_weeks(&mut self, week_qty: usize) -> Range<usize> {
        let len = self.grid.weeks().len();
        let week_qty = week_qty.min(len);
        if week_qty == 0 {
            return 0..0;
        }
        let cursor_week = self.grid.position(self.cursor).map_or(0, |(w, _)| w);
        if cursor_week < self.scroll {
            self.scroll = cursor_week;
        } else if cursor_week >= self.scroll + week_qty {
            self.scroll = cursor_week + 1 - week_qty;
        }
        self.scroll = self.scroll.min(len - week_qty);
        self.scroll..(self.scroll + week_qty)
    }
}

fn default_cursor(grid: &HeatmapGrid, today: Date) -> Date {
    if today.year() == grid.year() {
        today
    } else {
        grid.period_start()
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("cannot move past the edge of the heatmap")]
pub(crate) struct OutOfGridError;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::ContributionRecord;
    use time::macros::date;

    fn sample_log() -> ContributionLog {
        [
            (date!(2024 - 02 - 29), 3),
            (date!(2024 - 03 - 01), 1),
            (date!(2023 - 06 - 15), 8),
        ]
        .into_iter()
        .map(|(date, count)| ContributionRecord { date, count })
        .collect()
    }

    #[test]
    fn test_cursor_starts_today() {
        let view = HeatmapView::new(sample_log(), date!(2024 - 03 - 01), 2024).unwrap();
        assert_eq!(view.cursor(), date!(2024 - 03 - 01));
        assert_eq!(view.cursor_cell().map(|c| c.count), Some(1));
        assert_eq!(view.summary().total, 12);
        assert_eq!(view.current_streak(), 2);
    }

    #[test]
    fn test_cursor_starts_january_first() {
        let view = HeatmapView::new(sample_log(), date!(2024 - 03 - 01), 2023).unwrap();
        assert_eq!(view.cursor(), date!(2023 - 01 - 01));
        assert_eq!(view.grid().total_contributions(), 8);
    }

    #[test]
    fn test_invalid_year() {
        assert_eq!(
            HeatmapView::new(sample_log(), date!(2024 - 03 - 01), 1_000_000),
            Err(InvalidYearError { year: 1_000_000 })
        );
    }

    #[test]
    fn test_move_days() {
        let mut view = HeatmapView::new(sample_log(), date!(2024 - 03 - 01), 2024).unwrap();
        assert_eq!(view.move_days(-1), Ok(()));
        assert_eq!(view.cursor(), date!(2024 - 02 - 29));
        assert_eq!(view.move_days(7), Ok(()));
        assert_eq!(view.cursor(), date!(2024 - 03 - 07));
    }

    #[test]
    fn test_move_off_grid() {
        let mut view = HeatmapView::new(sample_log(), date!(2024 - 03 - 01), 2024).unwrap();
        view.cursor = date!(2023 - 12 - 31);
        assert_eq!(view.move_days(-1), Err(OutOfGridError));
        assert_eq!(view.cursor(), date!(2023 - 12 - 31));
        view.cursor = date!(2024 - 12 - 31);
        assert_eq!(view.move_days(7), Err(OutOfGridError));
        assert_eq!(view.cursor(), date!(2024 - 12 - 31));
        assert_eq!(view.move_days(4), Ok(()));
        assert_eq!(view.cursor(), date!(2025 - 01 - 04));
    }

    #[test]
    fn test_change_year_keeps_day() {
        let mut view = HeatmapView::new(sample_log(), date!(2024 - 03 - 01), 2024).unwrap();
        view.cursor = date!(2024 - 06 - 15);
        assert_eq!(view.previous_year(), Ok(()));
        assert_eq!(view.grid().year(), 2023);
        assert_eq!(view.cursor(), date!(2023 - 06 - 15));
        assert_eq!(view.cursor_cell().map(|c| c.count), Some(8));
    }

    #[test]
    fn test_change_year_from_leap_day() {
        let mut view = HeatmapView::new(sample_log(), date!(2024 - 02 - 29), 2024).unwrap();
        assert_eq!(view.next_year(), Ok(()));
        assert_eq!(view.cursor(), date!(2025 - 02 - 28));
    }

    #[test]
    fn test_change_year_from_padding_day() {
        let mut view = HeatmapView::new(sample_log(), date!(2024 - 03 - 01), 2024).unwrap();
        view.cursor = date!(2025 - 01 - 04);
        assert_eq!(view.next_year(), Ok(()));
        // 2026-01-04 is past the end of the 2025 grid
        assert_eq!(view.cursor(), date!(2025 - 01 - 01));
    }

    #[test]
    fn test_change_to_invalid_year() {
        let mut view = HeatmapView::new(sample_log(), date!(2024 - 03 - 01), 2024).unwrap();
        let before = view.clone();
        assert_eq!(
            view.set_year(1_000_000),
            Err(InvalidYearError { year: 1_000_000 })
        );
        assert_eq!(view, before);
    }

    #[test]
    fn test_jump_to_today() {
        let mut view = HeatmapView::new(sample_log(), date!(2024 - 03 - 01), 2019).unwrap();
        assert_eq!(view.jump_to_today(), Ok(()));
        assert_eq!(view.grid().year(), 2024);
        assert_eq!(view.cursor(), view.today);
    }

    #[test]
    fn test_visible_weeks() {
        let mut view = HeatmapView::new(sample_log(), date!(2024 - 01 - 01), 2024).unwrap();
        assert_eq!(view.visible_weeks(100), 0..53);
        assert_eq!(view.visible_weeks(10), 0..10);
        assert_eq!(view.visible_weeks(0), 0..0);
        // 2024-03-30 is in week 12
        view.cursor = date!(2024 - 03 - 30);
        assert_eq!(view.visible_weeks(10), 3..13);
        view.cursor = date!(2024 - 03 - 10);
        assert_eq!(view.visible_weeks(10), 3..13);
        view.cursor = date!(2024 - 01 - 10);
        assert_eq!(view.visible_weeks(10), 1..11);
        view.cursor = date!(2024 - 12 - 31);
        assert_eq!(view.visible_weeks(10), 43..53);
        assert_eq!(view.visible_weeks(53), 0..53);
    }
}
