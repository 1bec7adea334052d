mod app;
mod heatmap;
mod help;
mod jumpto;
mod records;
mod source;
mod theme;
use crate::app::App;
use crate::heatmap::HeatmapView;
use crate::source::{ContributionSource, DemoSource, FileSource};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the `tracing` filter directives used when
/// `--log-file` is given
const LOG_ENV_VAR: &str = "CONTRIBHEAT_LOG";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct RunOptions {
    year: Option<i32>,
    input: Input,
    summary: bool,
    log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Input {
    File(PathBuf),
    Demo,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut year = None;
        let mut summary = false;
        let mut demo = false;
        let mut file = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('y') | Arg::Long("year") => year = Some(parser.value()?.parse::<i32>()?),
                Arg::Long("summary") => summary = true,
                Arg::Long("demo") => demo = true,
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if file.is_none() => file = Some(PathBuf::from(value)),
                _ => return Err(arg.unexpected()),
            }
        }
        let input = match (file, demo) {
            (Some(path), false) => Input::File(path),
            (None, true) => Input::Demo,
            (Some(_), true) => return Err("FILE and --demo cannot be used together".into()),
            (None, false) => return Err("no input given; supply a FILE or --demo".into()),
        };
        Ok(Command::Run(RunOptions {
            year,
            input,
            summary,
            log_file,
        }))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => opts.run(),
            Command::Help => {
                println!("Usage: contribheat [options] [FILE]");
                println!();
                println!("Terminal contribution heatmap for a year of daily activity counts");
                println!();
                println!("FILE holds one \"YYYY-MM-DD COUNT\" pair per line, or, if it ends in");
                println!(".json, an array of {{\"date\": \"YYYY-MM-DD\", \"count\": N}} objects.");
                println!();
                println!("Options:");
                println!("  -y, --year YEAR     Show the given year [default: current year]");
                println!("      --demo          Show generated sample activity instead of FILE");
                println!("      --summary       Print summary statistics instead of the heatmap");
                println!("      --log-file PATH Write diagnostic logs to PATH (filter: ${LOG_ENV_VAR})");
                println!("  -h, --help          Display this help message and exit");
                println!("  -V, --version       Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl RunOptions {
    fn run(self) -> anyhow::Result<()> {
        // Determine the local offset before anything has a chance to spawn a
        // thread
        let today = OffsetDateTime::now_local()
            .context("failed to determine local date")?
            .date();
        if let Some(path) = &self.log_file {
            init_logging(path)?;
        }
        let source: Box<dyn ContributionSource> = match self.input {
            Input::File(path) => Box::new(FileSource::new(path)),
            Input::Demo => Box::new(DemoSource::new(today)),
        };
        let log = source
            .load()
            .context("failed to load contribution records")?;
        if log.is_empty() {
            tracing::warn!("no contribution records loaded");
        }
        let year = self.year.unwrap_or_else(|| today.year());
        let view = HeatmapView::new(log, today, year)?;
        tracing::info!(year, %today, "starting contribheat");
        if self.summary {
            print_summary(&view);
            Ok(())
        } else {
            with_terminal(|mut terminal| {
                terminal.hide_cursor().context("failed to hide cursor")?;
                App::new(view).run(terminal).context("terminal I/O failed")?;
                Ok(())
            })
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn print_summary(view: &HeatmapView) {
    for line in summary_lines(view) {
        println!("{line}");
    }
}

fn summary_lines(view: &HeatmapView) -> Vec<String> {
    let grid = view.grid();
    let summary = view.summary();
    vec![
        format!(
            "{} contributions in {}",
            grid.total_contributions(),
            grid.year()
        ),
        format!(
            "{} contributions on the busiest day of {}",
            grid.max_count(),
            grid.year()
        ),
        format!("{} total contributions", summary.total),
        format!("{} days active", summary.active_days),
        format!("{} contributions on your best day", summary.best_day),
        format!("{} day current streak", view.current_streak()),
        format!("{} day longest streak", summary.longest_streak),
    ]
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ContributionLog, ContributionRecord};
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_file() {
        assert_eq!(
            parse(&["activity.txt"]).unwrap(),
            Command::Run(RunOptions {
                year: None,
                input: Input::File(PathBuf::from("activity.txt")),
                summary: false,
                log_file: None,
            })
        );
    }

    #[test]
    fn test_all_options() {
        assert_eq!(
            parse(&["-y", "2023", "--summary", "--log-file", "heat.log", "--demo"]).unwrap(),
            Command::Run(RunOptions {
                year: Some(2023),
                input: Input::Demo,
                summary: true,
                log_file: Some(PathBuf::from("heat.log")),
            })
        );
        assert_eq!(
            parse(&["--year=-44", "--demo"]).unwrap(),
            Command::Run(RunOptions {
                year: Some(-44),
                input: Input::Demo,
                summary: false,
                log_file: None,
            })
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help", "--bogus"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_year() {
        assert!(parse(&["--year", "twenty", "--demo"]).is_err());
        assert!(parse(&["--year", "2024.5", "--demo"]).is_err());
    }

    #[test]
    fn test_summary_lines() {
        let log = [
            (date!(2023 - 12 - 30), 2),
            (date!(2024 - 03 - 01), 1),
            (date!(2024 - 03 - 02), 4),
        ]
        .into_iter()
        .map(|(date, count)| ContributionRecord { date, count })
        .collect::<ContributionLog>();
        let view = HeatmapView::new(log, date!(2024 - 03 - 02), 2024).unwrap();
        assert_eq!(
            summary_lines(&view),
            [
                "5 contributions in 2024",
                "4 contributions on the busiest day of 2024",
                "7 total contributions",
                "3 days active",
                "4 contributions on your best day",
                "2 day current streak",
                "2 day longest streak",
            ]
        );
    }

    #[test]
    fn test_input_required() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--demo", "activity.txt"]).is_err());
        assert!(parse(&["a.txt", "b.txt"]).is_err());
    }
}
