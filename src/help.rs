use crate::theme::{BASE_STYLE, LABEL_STYLE, TITLE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

static KEYS: &[(&str, &str)] = &[
    ("h, LEFT", "Previous week"),
    ("l, RIGHT", "Next week"),
    ("k, UP", "Previous day"),
    ("j, DOWN", "Next day"),
    ("[, PAGE UP", "Previous year"),
    ("], PAGE DOWN", "Next year"),
    ("0, HOME", "Jump to today"),
    ("g", "Input year to go to"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

/// Width of the column of key names
const KEY_COLUMN: usize = 16;

/// Popup listing the key bindings.  It is drawn just below the heatmap's
/// title line so that the year being viewed stays visible.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Help;

impl Help {
    fn text() -> Text<'static> {
        let mut lines = KEYS
            .iter()
            .map(|&(keys, action)| {
                Line::from_iter([
                    Span::styled(format!("{keys:<KEY_COLUMN$}"), TITLE_STYLE),
                    Span::styled(action, BASE_STYLE),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.push(Line::styled("Press any key to dismiss.", LABEL_STYLE));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        // Borders plus one column of padding on each side
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let top = u16::from(area.height > height);
        let [_, help_area] = Layout::vertical([top, height]).areas(area);
        let [help_area] = Layout::horizontal([width])
            .flex(Flex::Center)
            .areas(help_area);
        Clear.render(help_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center)
                    .padding(Padding::horizontal(1)),
            )
            .style(BASE_STYLE)
            .render(help_area, buf);
    }
}
