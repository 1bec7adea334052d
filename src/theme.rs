use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const LABEL_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const TOOLTIP_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// Days from the neighboring years that pad out the first and last weeks
pub(crate) const PADDING_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

/// Indexed by intensity level
pub(crate) const LEVEL_STYLES: [Style; 5] = [
    BASE_STYLE.fg(Color::DarkGray),
    BASE_STYLE.fg(Color::Rgb(14, 68, 41)),
    BASE_STYLE.fg(Color::Rgb(0, 109, 50)),
    BASE_STYLE.fg(Color::Rgb(38, 166, 65)),
    BASE_STYLE.fg(Color::Rgb(57, 211, 83)),
];

pub(crate) const CURSOR_MODIFIER: Modifier = Modifier::REVERSED;

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
