//! [`UiSurface`] on a full-screen crossterm terminal.

use super::render::{self, ViewerState};
use super::theme::Theme;
use crate::ui::{DialogChoice, MenuItem, TextPrompt, UiError, UiSurface, Viewer};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::debug;

/// Full-screen terminal surface. Restores the terminal when dropped.
pub struct TerminalUi {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    theme: Theme,
    tick_rate: Duration,
    viewer: Option<ViewerState>,
}

impl TerminalUi {
    /// Enter raw mode and the alternate screen.
    pub fn new(theme: Theme, tick_rate: Duration) -> Result<Self, UiError> {
        crossterm::terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen) {
            let _ = crossterm::terminal::disable_raw_mode();
            return Err(e.into());
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        debug!("Terminal surface ready (theme {})", theme.name);

        Ok(Self {
            terminal,
            theme,
            tick_rate,
            viewer: None,
        })
    }

    /// Block until a key is pressed. Resizes are picked up by the caller's redraw.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, UiError> {
        if !event::poll(self.tick_rate)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }

    fn draw_viewer(&mut self) -> Result<(), UiError> {
        let theme = &self.theme;
        if let Some(state) = &self.viewer {
            self.terminal.draw(|f| render::viewer(f, theme, state))?;
        }
        Ok(())
    }
}

impl Drop for TerminalUi {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            self.terminal.backend_mut(),
            crossterm::terminal::LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

fn is_back(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

impl Viewer for TerminalUi {
    fn open(&mut self) -> Result<(), UiError> {
        self.viewer = Some(ViewerState::default());
        self.terminal.clear()?;
        self.draw_viewer()
    }

    fn append(&mut self, text: &str) -> Result<(), UiError> {
        if let Some(state) = self.viewer.as_mut() {
            state.text.push_str(text);
        }
        self.draw_viewer()
    }

    fn is_open(&mut self) -> Result<bool, UiError> {
        let Some(state) = self.viewer.as_mut() else {
            return Ok(false);
        };

        let mut closed = false;
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    state.scroll_back = state.scroll_back.saturating_add(1)
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    state.scroll_back = state.scroll_back.saturating_sub(1)
                }
                KeyCode::PageUp => state.scroll_back = state.scroll_back.saturating_add(10),
                KeyCode::PageDown => state.scroll_back = state.scroll_back.saturating_sub(10),
                KeyCode::End => state.scroll_back = 0,
                KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => closed = true,
                _ if is_back(&key) => closed = true,
                _ => {}
            }
            if closed {
                break;
            }
        }

        if closed {
            self.viewer = None;
            self.terminal.clear()?;
            return Ok(false);
        }
        self.draw_viewer()?;
        Ok(true)
    }
}

impl UiSurface for TerminalUi {
    fn show_menu(&mut self, header: &str, items: &[MenuItem]) -> Result<Option<u32>, UiError> {
        if items.is_empty() {
            return Ok(None);
        }
        let mut selected = 0usize;
        loop {
            let theme = &self.theme;
            self.terminal
                .draw(|f| render::menu(f, theme, header, items, selected))?;

            let Some(key) = self.next_key()? else {
                continue;
            };
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    selected = selected.checked_sub(1).unwrap_or(items.len() - 1)
                }
                KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                    selected = (selected + 1) % items.len()
                }
                KeyCode::Enter => return Ok(Some(items[selected].value)),
                KeyCode::Char(c) => {
                    if let Some(item) = c.to_digit(10).and_then(|d| items.iter().find(|i| i.value == d)) {
                        return Ok(Some(item.value));
                    }
                    if c == 'q' {
                        return Ok(None);
                    }
                }
                _ if is_back(&key) => return Ok(None),
                _ => {}
            }
        }
    }

    fn prompt_text(&mut self, prompt: &TextPrompt) -> Result<Option<String>, UiError> {
        let mut input = prompt.default.chars().take(prompt.max_len).collect::<String>();
        loop {
            let theme = &self.theme;
            self.terminal.draw(|f| {
                render::prompt(f, theme, &prompt.header, &input, prompt.max_len)
            })?;

            let Some(key) = self.next_key()? else {
                continue;
            };
            match key.code {
                _ if is_back(&key) => return Ok(None),
                KeyCode::Enter => return Ok(Some(input)),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) if input.chars().count() < prompt.max_len => input.push(c),
                _ => {}
            }
        }
    }

    fn message(&mut self, header: &str, text: &str) -> Result<DialogChoice, UiError> {
        let mut choice = DialogChoice::Ok;
        loop {
            let theme = &self.theme;
            self.terminal
                .draw(|f| render::dialog(f, theme, header, text, choice))?;

            let Some(key) = self.next_key()? else {
                continue;
            };
            match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h' | 'l') => {
                    choice = match choice {
                        DialogChoice::Ok => DialogChoice::Cancel,
                        DialogChoice::Cancel => DialogChoice::Ok,
                    }
                }
                KeyCode::Enter => return Ok(choice),
                KeyCode::Char('c') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(DialogChoice::Cancel)
                }
                _ if is_back(&key) => return Ok(DialogChoice::Cancel),
                _ => {}
            }
        }
    }
}
