use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;

use crate::action::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Blocking source of input events. The whole program is turn based: draw a
/// frame, wait here, update state, draw again.
pub trait EventSource {
    fn next_event(&mut self) -> io::Result<Event>;
}

/// Reads key presses and resizes from the real terminal.
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<Event> {
        loop {
            match crossterm::event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Event::Key(key))
                }
                CrosstermEvent::Resize(w, h) => return Ok(Event::Resize(w, h)),
                _ => {}
            }
        }
    }
}

/// Which loop currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    DiffView,
    Menu,
    Infobox,
}

fn is_exit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
}

/// Map a key event to an action for the active loop. `None` means the key
/// has no binding and must not cause a redraw.
pub fn map_key_to_action(key: KeyEvent, ctx: KeyContext) -> Option<Action> {
    // Ctrl-C always leaves the current loop
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if is_exit_key(key.code) {
        return Some(Action::Quit);
    }

    match ctx {
        KeyContext::Infobox => Some(Action::Dismiss),
        KeyContext::Menu => match key.code {
            KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => Some(Action::Confirm),
            KeyCode::Up => Some(Action::Up),
            KeyCode::Down => Some(Action::Down),
            KeyCode::Home => Some(Action::Home),
            KeyCode::End => Some(Action::End),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::PageDown => Some(Action::PageDown),
            _ => None,
        },
        KeyContext::DiffView => match key.code {
            KeyCode::Char(' ') => Some(Action::ToggleLock),
            KeyCode::Tab => Some(Action::SwitchSide),
            KeyCode::Char('d' | 'D' | 'h' | 'H') => Some(Action::ToggleHighlight),
            KeyCode::Char('+') => Some(Action::ShiftPaneRight),
            KeyCode::Char('-') => Some(Action::ShiftPaneLeft),
            KeyCode::Char('=') => Some(Action::ResetPaneShift),
            KeyCode::Home => Some(Action::Home),
            KeyCode::End => Some(Action::End),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::Up => Some(Action::Up),
            KeyCode::Down => Some(Action::Down),
            KeyCode::Left => Some(Action::Left),
            KeyCode::Right => Some(Action::Right),
            _ => None,
        },
    }
}
