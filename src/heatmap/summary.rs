use crate::records::ContributionLog;
use std::iter::successors;
use time::Date;

/// Whole-log activity statistics, computed without regard to which year is
/// being displayed
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Summary {
    /// Sum of all positive counts
    pub(crate) total: u64,
    /// Number of distinct dates with a positive count
    pub(crate) active_days: usize,
    /// Highest single-day count
    pub(crate) best_day: u32,
    /// Longest run of consecutive active days
    pub(crate) longest_streak: usize,
}

impl Summary {
    pub(crate) fn of(log: &ContributionLog) -> Summary {
        let mut summary = Summary::default();
        let mut run = 0;
        let mut previous: Option<Date> = None;
        for (date, count) in log.iter().filter(|&(_, count)| count > 0) {
            summary.total += u64::from(count);
            summary.active_days += 1;
            summary.best_day = summary.best_day.max(count);
            run = if previous.and_then(Date::next_day) == Some(date) {
                run + 1
            } else {
                1
            };
            summary.longest_streak = summary.longest_streak.max(run);
            previous = Some(date);
        }
        summary
    }
}

/// Number of consecutive active days ending today.  A day without activity
/// so far does not break the streak until it is over, so if `today` has no
/// count the run ending yesterday is reported.
pub(crate) fn current_streak(log: &ContributionLog, today: Date) -> usize {
    let last = if log.count_on(today) > 0 {
        Some(today)
    } else {
        today.previous_day()
    };
    successors(last, |d| d.previous_day())
        .take_while(|&d| log.count_on(d) > 0)
        .count()
}
