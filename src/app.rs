use crate::heatmap::{Heatmap, HeatmapView};
use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};

const DAYS_IN_WEEK: i64 = 7;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    view: HeatmapView,
    state: AppState,
}

impl App {
    pub(crate) fn new(view: HeatmapView) -> App {
        App {
            view,
            state: AppState::Heatmap,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Heatmap => match key {
                KeyCode::Char('h') | KeyCode::Left => self.view.move_days(-DAYS_IN_WEEK).is_ok(),
                KeyCode::Char('l') | KeyCode::Right => self.view.move_days(DAYS_IN_WEEK).is_ok(),
                KeyCode::Char('k') | KeyCode::Up => self.view.move_days(-1).is_ok(),
                KeyCode::Char('j') | KeyCode::Down => self.view.move_days(1).is_ok(),
                KeyCode::Char('[') | KeyCode::PageUp => self.view.previous_year().is_ok(),
                KeyCode::Char(']') | KeyCode::PageDown => self.view.next_year().is_ok(),
                KeyCode::Char('0') | KeyCode::Home => self.view.jump_to_today().is_ok(),
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Heatmap;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Heatmap;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('-') => state.handle_input(JumpToInput::Negative),
                        KeyCode::Char('+') => state.handle_input(JumpToInput::Positive),
                        KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok())
                        {
                            Some(d) => state.handle_input(JumpToInput::Digit(d)),
                            None => JumpToOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(year) => match self.view.set_year(year) {
                            Ok(()) => {
                                self.state = AppState::Heatmap;
                                true
                            }
                            Err(e) => {
                                tracing::warn!(error = %e, "cannot go to year");
                                false
                            }
                        },
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        Heatmap.render(area, buf, &mut self.view);
        if self.state == AppState::Helping {
            Help.render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Heatmap,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
