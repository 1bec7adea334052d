use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

pub(crate) fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s.trim(), &YMD_FMT).ok()
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct ContributionRecord {
    pub(crate) date: Date,
    pub(crate) count: u32,
}

/// A record as it appears in a JSON data file.  The date is kept as a string
/// so that a single malformed date skips its record instead of failing the
/// whole file.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct RawRecord {
    pub(crate) date: String,
    pub(crate) count: u32,
}

/// Daily contribution counts keyed by date.  When the same date is inserted
/// more than once, the last count wins.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ContributionLog(BTreeMap<Date, u32>);

impl ContributionLog {
    pub(crate) fn new() -> ContributionLog {
        ContributionLog::default()
    }

    /// Build a log from `(date string, count)` pairs, skipping any entry
    /// whose date is not a valid `YYYY-MM-DD` calendar date
    pub(crate) fn from_raw<I, S>(entries: I) -> ContributionLog
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut log = ContributionLog::new();
        for (date, count) in entries {
            let date = date.as_ref();
            match parse_date(date) {
                Some(d) => {
                    log.insert(ContributionRecord { date: d, count });
                }
                None => tracing::warn!(date, count, "skipping record with invalid date"),
            }
        }
        log
    }

    /// Returns the count previously stored for the record's date, if any
    pub(crate) fn insert(&mut self, record: ContributionRecord) -> Option<u32> {
        self.0.insert(record.date, record.count)
    }

    pub(crate) fn count_on(&self, date: Date) -> u32 {
        self.0.get(&date).copied().unwrap_or(0)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Date, u32)> + '_ {
        self.0.iter().map(|(&date, &count)| (date, count))
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ContributionRecord> for ContributionLog {
    fn from_iter<I: IntoIterator<Item = ContributionRecord>>(iter: I) -> ContributionLog {
        let mut log = ContributionLog::new();
        for record in iter {
            log.insert(record);
        }
        log
    }
}

impl From<Vec<RawRecord>> for ContributionLog {
    fn from(records: Vec<RawRecord>) -> ContributionLog {
        ContributionLog::from_raw(records.into_iter().map(|r| (r.date, r.count)))
    }
}

/// Parse the plain-text record format: one `YYYY-MM-DD COUNT` (or
/// `YYYY-MM-DD,COUNT`) entry per line, with `#` starting a comment.
pub(crate) fn parse_lines(text: &str) -> Result<ContributionLog, ParseError> {
    let mut log = ContributionLog::new();
    for (i, line) in std::iter::zip(1usize.., text.lines()) {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let fields = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        let [date, count] = fields.as_slice() else {
            return Err(ParseError::Fields {
                line: i,
                found: fields.len(),
            });
        };
        let Ok(count) = count.parse::<u32>() else {
            return Err(ParseError::Count {
                line: i,
                value: (*count).to_owned(),
            });
        };
        match parse_date(date) {
            Some(date) => {
                if log.insert(ContributionRecord { date, count }).is_some() {
                    tracing::debug!(line = i, %date, "duplicate date; keeping later count");
                }
            }
            None => tracing::warn!(line = i, date, "skipping record with invalid date"),
        }
    }
    Ok(log)
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ParseError {
    #[error("line {line}: expected a date and a count, found {found} field(s)")]
    Fields { line: usize, found: usize },
    #[error("line {line}: invalid contribution count {value:?}")]
    Count { line: usize, value: String },
}
