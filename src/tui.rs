use anyhow::Result;
use crossterm::{
    cursor::{SetCursorStyle, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Cursor shown while a menu is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorMode {
    #[default]
    Hidden,
    Block,
}

/// Backends that can change the shape of the hardware cursor.
pub trait CursorShape {
    fn set_cursor_shape(&mut self, mode: CursorMode) -> io::Result<()>;
}

impl<W: Write> CursorShape for CrosstermBackend<W> {
    fn set_cursor_shape(&mut self, mode: CursorMode) -> io::Result<()> {
        let style = match mode {
            CursorMode::Hidden => SetCursorStyle::DefaultUserShape,
            CursorMode::Block => SetCursorStyle::SteadyBlock,
        };
        execute!(self, style)
    }
}

#[cfg(test)]
impl CursorShape for ratatui::backend::TestBackend {
    fn set_cursor_shape(&mut self, _mode: CursorMode) -> io::Result<()> {
        Ok(())
    }
}

pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
/// Each step runs independently so one failure doesn't skip the rest.
pub fn restore() -> Result<()> {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        SetCursorStyle::DefaultUserShape,
        Show,
        LeaveAlternateScreen
    );
    Ok(())
}

/// Owns the raw-mode, alternate-screen terminal and hands it back to the
/// shell when dropped, on every exit path including errors.
pub struct TerminalGuard {
    terminal: Option<Tui>,
}

impl TerminalGuard {
    pub fn acquire() -> Result<Self> {
        match init() {
            Ok(terminal) => Ok(Self {
                terminal: Some(terminal),
            }),
            Err(err) => {
                let _ = restore();
                Err(err)
            }
        }
    }

    /// Take the terminal out of the guard. Restoration still happens when
    /// the guard drops.
    pub fn take(&mut self) -> Option<Tui> {
        self.terminal.take()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore();
        tracing::debug!("terminal restored");
    }
}
