use super::intensity::Intensity;
use crate::records::ContributionLog;
use std::iter::successors;
use std::ops::Index;
use thiserror::Error;
use time::{Date, Duration, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Most week columns a year can span: a leap year starting on a Saturday
/// touches 54 Sunday-to-Saturday weeks
const MAX_WEEKS: usize = 54;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) date: Date,
    pub(crate) count: u32,
    pub(crate) in_target_year: bool,
}

impl DayCell {
    pub(crate) fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
// Invariant: seven consecutive days, starting on a Sunday
pub(crate) struct Week([DayCell; DAYS_IN_WEEK]);

impl Week {
    pub(crate) fn iter(&self) -> std::slice::Iter<'_, DayCell> {
        self.0.iter()
    }

    /// If an in-year month begins during this week, return that month
    pub(crate) fn month_start(&self) -> Option<Month> {
        self.0
            .iter()
            .find(|cell| cell.in_target_year && cell.date.day() == 1)
            .map(|cell| cell.date.month())
    }
}

impl Index<Weekday> for Week {
    type Output = DayCell;

    fn index(&self, wd: Weekday) -> &DayCell {
        &self.0[usize::from(wd.index0())]
    }
}

impl<'a> IntoIterator for &'a Week {
    type Item = &'a DayCell;
    type IntoIter = std::slice::Iter<'a, DayCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A year of daily contribution counts laid out in week columns, from the
/// Sunday on or before January 1 through the Saturday on or after December 31
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HeatmapGrid {
    year: i32,
    period_start: Date,
    start: Date,
    end: Date,
    weeks: Vec<Week>,
    max_count: u32,
    total_contributions: u64,
}

impl HeatmapGrid {
    pub(crate) fn build(year: i32, log: &ContributionLog) -> Result<HeatmapGrid, InvalidYearError> {
        let invalid = || InvalidYearError { year };
        let period_start =
            Date::from_calendar_date(year, Month::January, 1).map_err(|_| invalid())?;
        let period_end =
            Date::from_calendar_date(year, Month::December, 31).map_err(|_| invalid())?;
        let start = period_start
            .checked_sub(Duration::days(period_start.weekday().index0().into()))
            .ok_or_else(invalid)?;
        let end = period_end
            .checked_add(Duration::days((6 - period_end.weekday().index0()).into()))
            .ok_or_else(invalid)?;
        let mut max_count = 0;
        let mut total_contributions = 0;
        let mut cells = Vec::with_capacity(MAX_WEEKS * DAYS_IN_WEEK);
        for date in successors(Some(start), |d| d.next_day()).take_while(|&d| d <= end) {
            let cell = DayCell {
                date,
                count: log.count_on(date),
                in_target_year: date.year() == year,
            };
            if cell.in_target_year {
                max_count = max_count.max(cell.count);
                total_contributions += u64::from(cell.count);
            }
            cells.push(cell);
        }
        // `start` is a Sunday and `end` a Saturday, so the chunks are all
        // full weeks
        let weeks = cells
            .chunks_exact(DAYS_IN_WEEK)
            .filter_map(|chunk| <[DayCell; DAYS_IN_WEEK]>::try_from(chunk).ok())
            .map(Week)
            .collect::<Vec<_>>();
        tracing::debug!(
            year,
            weeks = weeks.len(),
            max_count,
            total_contributions,
            "built heatmap grid"
        );
        Ok(HeatmapGrid {
            year,
            period_start,
            start,
            end,
            weeks,
            max_count,
            total_contributions,
        })
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Highest count among the cells of the target year
    pub(crate) fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Sum of the counts of the cells in the target year
    pub(crate) fn total_contributions(&self) -> u64 {
        self.total_contributions
    }

    /// January 1 of the target year
    pub(crate) fn period_start(&self) -> Date {
        self.period_start
    }

    /// Returns the index of the week column containing `date` along with its
    /// row, or `None` if the date lies outside the grid
    pub(crate) fn position(&self, date: Date) -> Option<(usize, Weekday)> {
        if date < self.start || date > self.end {
            return None;
        }
        let offset = usize::try_from((date - self.start).whole_days()).ok()?;
        Some((offset / DAYS_IN_WEEK, date.weekday()))
    }

    pub(crate) fn cell(&self, date: Date) -> Option<&DayCell> {
        let (week, wd) = self.position(date)?;
        self.weeks.get(week).map(|w| &w[wd])
    }

    /// Cells outside the target year are always drawn at level zero
    pub(crate) fn intensity(&self, cell: &DayCell) -> Intensity {
        if cell.in_target_year {
            Intensity::classify(cell.count, self.max_count)
        } else {
            Intensity::Zero
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("year {year} is outside the supported calendar range")]
pub(crate) struct InvalidYearError {
    pub(crate) year: i32,
}
