use crate::records::{parse_lines, ContributionLog, ContributionRecord, ParseError, RawRecord};
use std::fs;
use std::io;
use std::iter::successors;
use std::path::PathBuf;
use thiserror::Error;
use time::Date;

/// Number of days of sample activity produced by [`DemoSource`]
const DEMO_DAYS: usize = 365;

/// Supplier of the contribution records to display
pub(crate) trait ContributionSource {
    fn load(&self) -> Result<ContributionLog, SourceError>;
}

/// Records read from a file.  Files with a `.json` extension hold an array of
/// `{"date": "YYYY-MM-DD", "count": N}` objects; anything else is read as one
/// `YYYY-MM-DD COUNT` pair per line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub(crate) fn new<P: Into<PathBuf>>(path: P) -> FileSource {
        FileSource { path: path.into() }
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

impl ContributionSource for FileSource {
    fn load(&self) -> Result<ContributionLog, SourceError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        let log = if self.is_json() {
            serde_json::from_str::<Vec<RawRecord>>(&text)
                .map(ContributionLog::from)
                .map_err(|source| SourceError::Json {
                    path: self.path.clone(),
                    source,
                })?
        } else {
            parse_lines(&text).map_err(|source| SourceError::Parse {
                path: self.path.clone(),
                source,
            })?
        };
        tracing::info!(path = %self.path.display(), days = log.len(), "loaded contribution records");
        Ok(log)
    }
}

/// Deterministic sample activity covering the year leading up to `today`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DemoSource {
    today: Date,
}

impl DemoSource {
    pub(crate) fn new(today: Date) -> DemoSource {
        DemoSource { today }
    }

    // Spread of 0-4 contributions a day, with quiet stretches
    fn count_for(date: Date) -> u32 {
        let seed = u32::from(date.ordinal()) * 7 + u32::from(date.day()) * 3;
        match seed % 11 {
            0..=3 => 0,
            k => (k - 3) % 5,
        }
    }
}

impl ContributionSource for DemoSource {
    fn load(&self) -> Result<ContributionLog, SourceError> {
        let log = successors(Some(self.today), |d| d.previous_day())
            .take(DEMO_DAYS)
            .map(|date| ContributionRecord {
                date,
                count: DemoSource::count_for(date),
            })
            .collect::<ContributionLog>();
        tracing::info!(days = log.len(), "generated demo contribution records");
        Ok(log)
    }
}

#[derive(Debug, Error)]
pub(crate) enum SourceError {
    #[error("failed to read {}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {} as JSON records", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to parse {}", .path.display())]
    Parse { path: PathBuf, source: ParseError },
}
