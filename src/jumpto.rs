use crate::theme::{
    jumpto::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 18;
const OUTER_HEIGHT: u16 = 8;
const YEAR_DIGITS: usize = 4;
const ENTER_POS: usize = YEAR_DIGITS;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct JumpTo;

impl StatefulWidget for JumpTo {
    type State = JumpToState;

    /*
     * ..................
     * .┌ Go to Year… ─┐.
     * .│              │.
     * .│    -YYYY     │.
     * .│              │.
     * .│   [ENTER]    │.
     * .└──────────────┘.
     * ..................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Go to Year… ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct JumpToState {
    negative: bool,
    year: [Option<u8>; YEAR_DIGITS],
    pos: usize,
}

impl JumpToState {
    pub(crate) fn new() -> JumpToState {
        JumpToState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Style a span and convert it to a line rather than creating a
            // styled line directly so that only the "[ENTER]" text and not any
            // of its centering padding will be underlined:
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = Vec::with_capacity(YEAR_DIGITS + 1);
        spans.push(Span::styled(
            if self.negative { "-" } else { " " },
            BASE_STYLE,
        ));
        for dg in self.year {
            spans.push(match dg {
                Some(d) => Span::styled(format!("{d}"), BASE_STYLE),
                None => Span::styled("Y", UNFILLED_CELL_STYLE),
            });
        }
        Line::from_iter(spans)
    }

    pub(crate) fn handle_input(&mut self, input: JumpToInput) -> JumpToOutput {
        match (input, self.pos) {
            (JumpToInput::Negative, 0) => {
                self.negative = !self.negative;
                JumpToOutput::Ok
            }
            (JumpToInput::Positive, 0) => {
                self.negative = false;
                JumpToOutput::Ok
            }
            (JumpToInput::Digit(d), 0..ENTER_POS) if d < 10 => {
                self.year[self.pos] = Some(d);
                self.pos += 1;
                JumpToOutput::Ok
            }
            (JumpToInput::Backspace, 1..) => {
                self.pos -= 1;
                self.year[self.pos] = None;
                JumpToOutput::Ok
            }
            (JumpToInput::Enter, ENTER_POS) => {
                let year = self
                    .year
                    .iter()
                    .flatten()
                    .fold(0i32, |acc, &d| acc * 10 + i32::from(d));
                JumpToOutput::Jump(if self.negative { -year } else { year })
            }
            _ => JumpToOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToInput {
    Negative,
    Positive,
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToOutput {
    Ok,
    Invalid,
    Jump(i32),
}
