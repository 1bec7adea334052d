use super::grid::{DayCell, WeekdayExt};
use super::intensity::Intensity;
use super::summary::Summary;
use super::view::HeatmapView;
use crate::theme::{
    BASE_STYLE, CURSOR_MODIFIER, LABEL_STYLE, LEVEL_STYLES, PADDING_STYLE, TITLE_STYLE,
    TOOLTIP_STYLE,
};
use ratatui::{prelude::*, widgets::*};
use time::{
    format_description::FormatItem,
    macros::format_description,
    Month,
    Weekday::{self, Friday, Monday, Wednesday},
};

static TOOLTIP_DATE_FMT: &[FormatItem<'_>] =
    format_description!("[weekday repr:short], [month repr:short] [day padding:none], [year]");

static MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

static WEEKDAY_LABELS: [(Weekday, &str); 3] = [(Monday, "Mon"), (Wednesday, "Wed"), (Friday, "Fri")];

/// Number of columns on the left side of the heatmap, used as the margin in
/// which weekday names are written
const LEFT_MARGIN: u16 = 4;

/// Number of columns per week: the day's square and a gap
const CELL_WIDTH: u16 = 2;

const TITLE_LINE: u16 = 0;

const MONTH_LINE: u16 = 1;

/// Line on which Sunday's cells are drawn; the other weekdays follow below
const GRID_TOP: u16 = 2;

const TOOLTIP_LINE: u16 = GRID_TOP + 8;

const FOOTER_LINE: u16 = TOOLTIP_LINE + 1;

const LEGEND_LESS: &str = "Less ";

const LEGEND_MORE: &str = "More";

// "Less ■ ■ ■ ■ ■ More"
const LEGEND_WIDTH: u16 = 19;

const DAY_SYMBOL: &str = "■";

const PADDING_SYMBOL: &str = "·";

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Heatmap;

impl Heatmap {
    fn weeks_for_columns(columns: u16) -> usize {
        (columns.saturating_sub(LEFT_MARGIN) / CELL_WIDTH).into()
    }
}

impl StatefulWidget for Heatmap {
    type State = HeatmapView;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let visible = state.visible_weeks(Self::weeks_for_columns(area.width));
        let grid = state.grid();
        let cursor = state.cursor();
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(grid.total_contributions(), grid.year());
        canvas.draw_weekday_labels();
        let weeks = grid.weeks().get(visible).unwrap_or_default();
        for (col, week) in std::iter::zip(0u16.., weeks) {
            if let Some(month) = week.month_start() {
                canvas.draw_month(col, month);
            }
            for cell in week {
                let mut style = if cell.in_target_year {
                    LEVEL_STYLES[grid.intensity(cell).level()]
                } else {
                    PADDING_STYLE
                };
                if cell.date == cursor {
                    style = style.add_modifier(CURSOR_MODIFIER);
                }
                canvas.draw_cell(col, cell, style);
            }
        }
        if let Some(cell) = state.cursor_cell() {
            canvas.draw_tooltip(cell);
        }
        canvas.draw_footer(
            grid.total_contributions(),
            state.summary(),
            state.current_streak(),
        );
    }
}

pub(crate) fn tooltip(cell: &DayCell) -> String {
    let date = cell
        .date
        .format(&TOOLTIP_DATE_FMT)
        .unwrap_or_else(|_| cell.date.to_string());
    let plural = if cell.count == 1 { "" } else { "s" };
    format!("{date}: {} contribution{plural}", cell.count)
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, total: u64, year: i32) {
        let title = format!("{total} contributions in {year}");
        let width = u16::try_from(title.len()).unwrap_or(u16::MAX);
        self.mvprint(TITLE_LINE, 0, title, Some(TITLE_STYLE));
        if width.saturating_add(LEGEND_WIDTH) < self.area.width {
            self.draw_legend(self.area.width - LEGEND_WIDTH);
        }
    }

    fn draw_legend(&mut self, x: u16) {
        self.mvprint(TITLE_LINE, x, LEGEND_LESS, Some(LABEL_STYLE));
        let mut x = x + 5;
        for intensity in Intensity::ALL {
            self.mvprint(
                TITLE_LINE,
                x,
                DAY_SYMBOL,
                Some(LEVEL_STYLES[intensity.level()]),
            );
            x += CELL_WIDTH;
        }
        self.mvprint(TITLE_LINE, x, LEGEND_MORE, Some(LABEL_STYLE));
    }

    fn draw_weekday_labels(&mut self) {
        for (wd, label) in WEEKDAY_LABELS {
            self.mvprint(GRID_TOP + wd.index0(), 0, label, Some(LABEL_STYLE));
        }
    }

    fn draw_month(&mut self, col: u16, month: Month) {
        let label = MONTH_LABELS[usize::from(u8::from(month) - 1)];
        self.mvprint(
            MONTH_LINE,
            LEFT_MARGIN + col * CELL_WIDTH,
            label,
            Some(LABEL_STYLE),
        );
    }

    fn draw_cell(&mut self, col: u16, cell: &DayCell, style: Style) {
        let symbol = if cell.in_target_year {
            DAY_SYMBOL
        } else {
            PADDING_SYMBOL
        };
        self.mvprint(
            GRID_TOP + cell.weekday().index0(),
            LEFT_MARGIN + col * CELL_WIDTH,
            symbol,
            Some(style),
        );
    }

    fn draw_tooltip(&mut self, cell: &DayCell) {
        self.mvprint(TOOLTIP_LINE, LEFT_MARGIN, tooltip(cell), Some(TOOLTIP_STYLE));
    }

    fn draw_footer(&mut self, total: u64, summary: &Summary, streak: usize) {
        let footer = format!(
            "{total} total contributions   {} days active   {} contributions on your best day   {streak} day streak",
            summary.active_days, summary.best_day,
        );
        self.mvprint(FOOTER_LINE, 0, footer, Some(BASE_STYLE));
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // heatmap's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ContributionLog, ContributionRecord};
    use ratatui::buffer::Cell;
    use time::macros::date;

    fn sample_log() -> ContributionLog {
        [
            (date!(2024 - 01 - 01), 5),
            (date!(2024 - 03 - 01), 1),
            (date!(2024 - 03 - 02), 4),
        ]
        .into_iter()
        .map(|(date, count)| ContributionRecord { date, count })
        .collect()
    }

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)))
            .map(Cell::symbol)
            .collect()
    }

    fn fg_at(buf: &Buffer, x: u16, y: u16) -> Option<Color> {
        buf.cell((x, y)).map(|c| c.fg)
    }

    fn reversed_at(buf: &Buffer, x: u16, y: u16) -> bool {
        buf.cell((x, y))
            .is_some_and(|c| c.modifier.contains(Modifier::REVERSED))
    }

    #[test]
    fn test_tooltip() {
        let cell = DayCell {
            date: date!(2024 - 01 - 01),
            count: 1,
            in_target_year: true,
        };
        assert_eq!(tooltip(&cell), "Mon, Jan 1, 2024: 1 contribution");
        let cell = DayCell {
            date: date!(2023 - 12 - 31),
            count: 0,
            in_target_year: false,
        };
        assert_eq!(tooltip(&cell), "Sun, Dec 31, 2023: 0 contributions");
    }

    #[test]
    fn test_full_year() {
        let mut view = HeatmapView::new(sample_log(), date!(2024 - 03 - 02), 2024).unwrap();
        let area = Rect::new(0, 0, 110, 12);
        let mut buf = Buffer::empty(area);
        Heatmap.render(area, &mut buf, &mut view);

        let title = line(&buf, 0);
        assert!(title.starts_with("10 contributions in 2024 "));
        assert!(title.ends_with("Less ■ ■ ■ ■ ■ More"));
        assert_eq!(fg_at(&buf, 96, 0), LEVEL_STYLES[0].fg);
        assert_eq!(fg_at(&buf, 104, 0), LEVEL_STYLES[4].fg);

        assert!(line(&buf, 1).starts_with("    Jan     Feb     Mar       Apr"));
        assert!(line(&buf, 2).starts_with("    · ■ ■ ■"));
        assert!(line(&buf, 3).starts_with("Mon ■ ■ ■ ■"));
        assert!(line(&buf, 5).starts_with("Wed ■ ■"));
        assert!(line(&buf, 7).starts_with("Fri ■ ■"));

        // Final week: Sunday, December 29 through Saturday, January 4
        assert_eq!(line(&buf, 2).trim_end().chars().last(), Some('■'));
        assert_eq!(buf.cell((108, 4)).map(Cell::symbol), Some("■"));
        assert_eq!(buf.cell((108, 5)).map(Cell::symbol), Some("·"));
        assert_eq!(fg_at(&buf, 108, 5), PADDING_STYLE.fg);

        // January 1 is the busiest day
        assert_eq!(fg_at(&buf, 4, 3), LEVEL_STYLES[4].fg);
        // December 31, 2023
        assert_eq!(fg_at(&buf, 4, 2), PADDING_STYLE.fg);
        // March 1 and 2 are in week 8
        assert_eq!(fg_at(&buf, 20, 7), LEVEL_STYLES[1].fg);
        assert_eq!(fg_at(&buf, 20, 8), LEVEL_STYLES[4].fg);
        assert!(reversed_at(&buf, 20, 8));
        assert!(!reversed_at(&buf, 20, 7));

        assert_eq!(
            line(&buf, 10).trim_end(),
            "    Sat, Mar 2, 2024: 4 contributions"
        );
        assert_eq!(
            line(&buf, 11).trim_end(),
            "10 total contributions   3 days active   5 contributions on your best day   2 day streak"
        );
    }

    #[test]
    fn test_scrolled_to_cursor() {
        let mut view =
            HeatmapView::new(ContributionLog::new(), date!(2024 - 12 - 31), 2024).unwrap();
        let area = Rect::new(0, 0, 30, 12);
        let mut buf = Buffer::empty(area);
        Heatmap.render(area, &mut buf, &mut view);
        assert_eq!(line(&buf, 0).trim_end(), "0 contributions in 2024");
        assert_eq!(line(&buf, 1).trim_end(), "          Nov       Dec");
        assert!(reversed_at(&buf, 28, 4));
        assert_eq!(buf.cell((28, 5)).map(Cell::symbol), Some("·"));
        assert_eq!(
            line(&buf, 10).trim_end(),
            "    Tue, Dec 31, 2024: 0 contr"
        );
        assert_eq!(line(&buf, 11), "0 total contributions   0 days");
    }

    #[test]
    fn test_tiny_area() {
        let mut view = HeatmapView::new(sample_log(), date!(2024 - 03 - 02), 2024).unwrap();
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        Heatmap.render(area, &mut buf, &mut view);
        assert_eq!(line(&buf, 0), "10 ");
        assert_eq!(line(&buf, 1), "   ");
    }
}
