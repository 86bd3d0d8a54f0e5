//! Scrollable list of choices with a title, body text and an error banner.
//!
//! Backs the main menu, the command help screen and the file browser.

use crate::action::Action;
use crate::tui::CursorMode;

/// How far PageUp / PageDown move the selection.
pub const PAGE_STRIDE: usize = 4;

/// Redraws an error banner survives before it is cleared.
pub const DEFAULT_ERROR_TICKS: u32 = 5;

/// Column at which body, error and choice lines start.
pub const INDENT: u16 = 4;

/// Result of a finished menu interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Enter pressed on this choice index.
    Selected(usize),
    /// Escape, `q` or `Q` pressed.
    Cancelled,
    /// An infobox was closed by a keypress.
    Dismissed,
}

/// An error message shown between the body and the choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    lines: Vec<String>,
    ticks_remaining: u32,
}

impl ErrorBanner {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Screen rows taken, including the blank row that follows it.
    pub fn rows(&self) -> usize {
        self.lines.len() + 1
    }
}

#[derive(Debug, Clone)]
pub struct ChoiceList {
    pub title: String,
    /// Sections of body text, separated on screen by blank rows.
    pub body: Vec<Vec<String>>,
    pub choices: Vec<String>,
    /// Return on the first keypress without offering a selection.
    pub infobox: bool,
    pub cursor: CursorMode,
    selection: usize,
    topline: usize,
    error: Option<ErrorBanner>,
    error_ticks: u32,
}

impl ChoiceList {
    pub fn new(title: impl Into<String>, body: Vec<Vec<String>>, choices: Vec<String>) -> Self {
        Self {
            title: title.into(),
            body,
            choices,
            infobox: false,
            cursor: CursorMode::Hidden,
            selection: 0,
            topline: 0,
            error: None,
            error_ticks: DEFAULT_ERROR_TICKS,
        }
    }

    /// A list that shows `body` plus a single prompt line and closes on any key.
    pub fn infobox(title: impl Into<String>, body: Vec<Vec<String>>, prompt: impl Into<String>) -> Self {
        Self {
            infobox: true,
            ..Self::new(title, body, vec![prompt.into()])
        }
    }

    pub fn with_cursor(mut self, cursor: CursorMode) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_error_ticks(mut self, ticks: u32) -> Self {
        self.error_ticks = ticks.max(1);
        self
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn topline(&self) -> usize {
        self.topline
    }

    pub fn error(&self) -> Option<&ErrorBanner> {
        self.error.as_ref()
    }

    /// Replace the choices and return to the top of the list.
    pub fn set_choices(&mut self, choices: Vec<String>) {
        self.choices = choices;
        self.selection = 0;
        self.topline = 0;
    }

    #[cfg(test)]
    pub fn set_selection(&mut self, index: usize) {
        self.selection = index.min(self.last_index());
    }

    /// Show an error banner. Blank lines are dropped; a message with no
    /// visible text is ignored so an empty banner can never be shown.
    pub fn set_error<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .map(Into::into)
            .filter(|line| !line.trim().is_empty())
            .collect();
        if lines.is_empty() {
            return;
        }
        self.error = Some(ErrorBanner {
            lines,
            ticks_remaining: self.error_ticks,
        });
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn last_index(&self) -> usize {
        self.choices.len().saturating_sub(1)
    }

    /// Rows above the first choice: title, blank, body sections each followed
    /// by a blank, then the error banner if present.
    pub fn header_rows(&self) -> usize {
        let body: usize = self.body.iter().map(|section| section.len() + 1).sum();
        2 + body + self.error.as_ref().map_or(0, ErrorBanner::rows)
    }

    /// Choice rows that fit below the header on a terminal `height` rows tall.
    pub fn visible_rows(&self, height: u16) -> usize {
        usize::from(height).saturating_sub(self.header_rows()).max(1)
    }

    /// Widest line of the whole block, used to centre it horizontally.
    pub fn content_width(&self) -> usize {
        let width = |s: &String| s.chars().count();
        let body = self.body.iter().flatten().map(width);
        let error = self.error.iter().flat_map(|e| e.lines.iter()).map(width);
        let choices = self.choices.iter().map(width);
        body.chain(error)
            .chain(choices)
            .fold(self.title.chars().count(), usize::max)
    }

    /// Advance the error countdown by one redraw and fit the window to the
    /// current height. Call once before drawing each frame.
    pub fn begin_frame(&mut self, height: u16) {
        if let Some(banner) = self.error.as_mut() {
            if banner.ticks_remaining == 0 {
                let reclaimed = banner.rows();
                self.error = None;
                self.topline = self.topline.saturating_sub(reclaimed);
            } else {
                banner.ticks_remaining -= 1;
            }
        }
        self.scroll_into_view(height);
    }

    /// Apply a key action. Returns the outcome once the interaction is over.
    pub fn handle(&mut self, action: Action, height: u16) -> Option<MenuOutcome> {
        if action == Action::Resize {
            self.scroll_into_view(height);
            return None;
        }
        if action == Action::Quit {
            return Some(MenuOutcome::Cancelled);
        }
        if self.infobox {
            return Some(MenuOutcome::Dismissed);
        }

        let last = self.last_index();
        match action {
            Action::Confirm => {
                if !self.choices.is_empty() {
                    return Some(MenuOutcome::Selected(self.selection));
                }
            }
            Action::Home => self.selection = 0,
            Action::End => self.selection = last,
            Action::Up => self.selection = self.selection.saturating_sub(1),
            Action::Down => self.selection = (self.selection + 1).min(last),
            Action::PageUp => self.selection = self.selection.saturating_sub(PAGE_STRIDE),
            Action::PageDown => self.selection = (self.selection + PAGE_STRIDE).min(last),
            _ => {}
        }
        self.scroll_into_view(height);
        None
    }

    /// Move `topline` the least distance that keeps the selection visible.
    fn scroll_into_view(&mut self, height: u16) {
        let rows = self.visible_rows(height);
        if self.selection < self.topline {
            self.topline = self.selection;
        } else if self.selection >= self.topline + rows {
            self.topline = self.selection + 1 - rows;
        }
    }
}
