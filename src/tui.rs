use crate::event::{Event, EventConversionUndefinedError};
use crate::window::MainWindow;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
};
use futures::StreamExt;
use std::io;
use thiserror::Error;
use tui::{backend::CrosstermBackend, Terminal};

mod render;
mod widgets;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    input: EventStream,
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl Tui {
    pub fn new() -> Result<Self, TuiError> {
        let backend = CrosstermBackend::new(io::stdout());

        Ok(Tui {
            terminal: Terminal::new(backend).map_err(TuiError::Creation)?,
            input: EventStream::new(),
            alternate_screen_enabled: false,
            raw_mode_enabled: false,
        })
    }

    /// Has to be explicitly disabled, because disabling can cause errors that have to be catched.
    /// Is not disabled by dropping.
    pub fn enable(&mut self) -> Result<(), TuiError> {
        crossterm::terminal::enable_raw_mode().map_err(TuiError::RawModeToggle)?;
        self.raw_mode_enabled = true;

        crossterm::execute!(
            self.terminal.backend_mut(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::event::EnableMouseCapture,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        )
        .map_err(TuiError::AlternateScreenToggle)?;
        self.alternate_screen_enabled = true;

        self.terminal.hide_cursor().map_err(TuiError::Rendering)?;

        Ok(())
    }

    pub fn disable(&mut self) -> Result<(), TuiError> {
        if self.alternate_screen_enabled {
            crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
                crossterm::terminal::LeaveAlternateScreen,
                crossterm::event::DisableMouseCapture,
            )
            .map_err(TuiError::AlternateScreenToggle)?;
            self.alternate_screen_enabled = false;
        }
        if self.raw_mode_enabled {
            crossterm::terminal::disable_raw_mode().map_err(TuiError::RawModeToggle)?;
            self.raw_mode_enabled = false;
        }

        self.terminal.show_cursor().map_err(TuiError::Rendering)?;

        Ok(())
    }

    pub fn render(&mut self, window: &MainWindow) -> Result<(), TuiError> {
        self.terminal
            .draw(|f| {
                render::render_ui(f, window);
            })
            .map_err(TuiError::Rendering)?;

        Ok(())
    }

    /// Waits for the next input that maps to an [`Event`], skipping the rest.
    pub async fn read_event(&mut self) -> Result<Event, TuiError> {
        loop {
            let crossterm_event = self
                .input
                .next()
                .await
                .ok_or(TuiError::InputClosed)?
                .map_err(TuiError::ReadInputEvent)?;

            if let Ok(event) = crossterm_event.try_into() {
                return Ok(event);
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("failed to initialize terminal ui: {0}")]
    Creation(io::Error),
    #[error("failed to toggle terminal raw mode: {0}")]
    RawModeToggle(io::Error),
    #[error("failed to toggle alternate terminal screen: {0}")]
    AlternateScreenToggle(io::Error),
    #[error("failed to render terminal ui: {0}")]
    Rendering(io::Error),
    #[error("failed to read input event from terminal: {0}")]
    ReadInputEvent(io::Error),
    #[error("terminal input stream closed")]
    InputClosed,
}

impl TryFrom<CrosstermEvent> for Event {
    type Error = EventConversionUndefinedError;

    fn try_from(value: CrosstermEvent) -> Result<Self, Self::Error> {
        match value {
            CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Release => None,
            CrosstermEvent::Key(key_event)
                if key_event.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                match key_event.code {
                    KeyCode::Char('c') => Some(Event::Quit),
                    _ => None,
                }
            }
            CrosstermEvent::Key(key_event) => match key_event.code {
                KeyCode::Char('q') => Some(Event::Quit),
                KeyCode::Esc => Some(Event::Quit),
                KeyCode::Enter | KeyCode::Char('o') => Some(Event::StartCounter),
                KeyCode::Char(' ') | KeyCode::Char('b') => Some(Event::TogglePrice),
                KeyCode::Up | KeyCode::Char('+') => Some(Event::IncreaseMaximum),
                KeyCode::Down | KeyCode::Char('-') => Some(Event::DecreaseMaximum),
                _ => None,
            },
            CrosstermEvent::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::ScrollUp => Some(Event::IncreaseMaximum),
                MouseEventKind::ScrollDown => Some(Event::DecreaseMaximum),
                _ => None,
            },
            CrosstermEvent::Resize(_, _) => Some(Event::Redraw),
            _ => None,
        }
        .ok_or(EventConversionUndefinedError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Option<Event> {
        CrosstermEvent::Key(KeyEvent::new(code, modifiers))
            .try_into()
            .ok()
    }

    fn scroll(kind: MouseEventKind) -> Option<Event> {
        CrosstermEvent::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
        .try_into()
        .ok()
    }

    #[test]
    fn keys_map_to_controls() {
        let none = KeyModifiers::NONE;
        assert_eq!(key(KeyCode::Enter, none), Some(Event::StartCounter));
        assert_eq!(key(KeyCode::Char('o'), none), Some(Event::StartCounter));
        assert_eq!(key(KeyCode::Char(' '), none), Some(Event::TogglePrice));
        assert_eq!(key(KeyCode::Char('b'), none), Some(Event::TogglePrice));
        assert_eq!(key(KeyCode::Up, none), Some(Event::IncreaseMaximum));
        assert_eq!(key(KeyCode::Char('-'), none), Some(Event::DecreaseMaximum));
        assert_eq!(key(KeyCode::Char('x'), none), None);
    }

    #[test]
    fn quit_keys() {
        assert_eq!(key(KeyCode::Char('q'), KeyModifiers::NONE), Some(Event::Quit));
        assert_eq!(key(KeyCode::Esc, KeyModifiers::NONE), Some(Event::Quit));
        assert_eq!(key(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Event::Quit));
        assert_eq!(key(KeyCode::Char('o'), KeyModifiers::CONTROL), None);
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        let event: Result<Event, _> = CrosstermEvent::Key(release).try_into();
        assert!(event.is_err());
    }

    #[test]
    fn scrolling_steps_the_maximum() {
        assert_eq!(scroll(MouseEventKind::ScrollUp), Some(Event::IncreaseMaximum));
        assert_eq!(scroll(MouseEventKind::ScrollDown), Some(Event::DecreaseMaximum));
        assert_eq!(scroll(MouseEventKind::Moved), None);
    }

    #[test]
    fn resize_redraws() {
        let event: Result<Event, _> = CrosstermEvent::Resize(80, 24).try_into();
        assert_eq!(event.ok(), Some(Event::Redraw));
    }
}
