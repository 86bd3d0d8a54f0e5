//! The terminal session every screen draws through.

use ratatui::{backend::Backend, layout::Size, Frame, Terminal};
use std::io;

use crate::event::{Event, EventSource};
use crate::theme::Theme;
use crate::tui::{CursorMode, CursorShape};

/// Terminal, input source and theme, passed by reference to whichever loop
/// currently owns the screen.
pub struct Session<B: Backend + CursorShape, E: EventSource> {
    terminal: Terminal<B>,
    events: E,
    theme: Theme,
    frames: u64,
}

impl<B: Backend + CursorShape, E: EventSource> Session<B, E> {
    pub fn new(terminal: Terminal<B>, events: E, theme: Theme) -> Self {
        Self {
            terminal,
            events,
            theme,
            frames: 0,
        }
    }

    /// Draw one full frame. The frame is cleared first, so anything not
    /// drawn shows as background.
    pub fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame, &Theme),
    {
        let theme = &self.theme;
        self.terminal.draw(|frame| render(frame, theme))?;
        self.frames += 1;
        Ok(())
    }

    pub fn next_event(&mut self) -> io::Result<Event> {
        self.events.next_event()
    }

    pub fn size(&self) -> io::Result<Size> {
        self.terminal.size()
    }

    pub fn set_cursor_shape(&mut self, mode: CursorMode) -> io::Result<()> {
        self.terminal.backend_mut().set_cursor_shape(mode)
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.terminal.hide_cursor()
    }

    /// Frames drawn so far.
    #[cfg(test)]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    #[cfg(test)]
    pub fn events(&self) -> &E {
        &self.events
    }
}
