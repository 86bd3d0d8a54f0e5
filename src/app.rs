use anyhow::Result;
use ratatui::backend::Backend;

use crate::action::Action;
use crate::components::choice_list::ChoiceListView;
use crate::components::split_pane::SplitPane;
use crate::components::Component;
use crate::config::SplitdiffConfig;
use crate::content::LineSequence;
use crate::event::{map_key_to_action, Event, EventSource, KeyContext};
use crate::fs::FileSystem;
use crate::session::Session;
use crate::state::app_state::APP_TITLE;
use crate::state::{
    AppState, BrowseStep, ChoiceList, DirectoryCursor, FileBrowser, LoadedFile, MenuEntry,
    MenuOutcome, Side, ViewContext, ViewportState,
};
use crate::tui::{CursorMode, CursorShape};

/// Sentence describing what the row highlight can and cannot do.
pub const HIGHLIGHT_LIMITATION: &str =
    "It only compares lines on the same screen row and is not a true diff.";

/// Run a choice list until the user picks, cancels or dismisses it.
///
/// The list's cursor shape is shown only while it owns the screen; the
/// hidden cursor is restored on every return path.
pub fn run_choice_list<B, E>(session: &mut Session<B, E>, list: &mut ChoiceList) -> Result<MenuOutcome>
where
    B: Backend + CursorShape,
    E: EventSource,
{
    session.set_cursor_shape(list.cursor)?;
    let outcome = choice_loop(session, list);
    let restored = session
        .set_cursor_shape(CursorMode::Hidden)
        .and_then(|()| session.hide_cursor());
    let outcome = outcome?;
    restored?;
    Ok(outcome)
}

fn choice_loop<B, E>(session: &mut Session<B, E>, list: &mut ChoiceList) -> Result<MenuOutcome>
where
    B: Backend + CursorShape,
    E: EventSource,
{
    let context = if list.infobox {
        KeyContext::Infobox
    } else {
        KeyContext::Menu
    };
    loop {
        let height = session.size()?.height;
        list.begin_frame(height);
        session.draw(|frame, theme| {
            let area = frame.area();
            ChoiceListView.render(frame, area, list, theme)
        })?;

        let (action, height) = match session.next_event()? {
            Event::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
                (Some(Action::Resize), height)
            }
            Event::Key(key) => (map_key_to_action(key, context), session.size()?.height),
        };
        if let Some(outcome) = action.and_then(|a| list.handle(a, height)) {
            return Ok(outcome);
        }
    }
}

/// Show two line sequences side by side until an exit key is pressed.
/// Returns the final scroll state.
pub fn run_diff_view<B, E>(
    session: &mut Session<B, E>,
    lhs: &LineSequence,
    rhs: &LineSequence,
    highlight: bool,
    gap_half_width: u16,
) -> Result<ViewportState>
where
    B: Backend + CursorShape,
    E: EventSource,
{
    let mut state = ViewportState::new(highlight);
    let pane = SplitPane {
        lhs,
        rhs,
        gap_half_width,
    };
    let mut repaint = true;
    loop {
        if repaint {
            session.draw(|frame, theme| {
                let area = frame.area();
                pane.render(frame, area, &state, theme)
            })?;
        }

        let action = match session.next_event()? {
            Event::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
                Action::Resize
            }
            Event::Key(key) => match map_key_to_action(key, KeyContext::DiffView) {
                Some(action) => action,
                None => {
                    repaint = false;
                    continue;
                }
            },
        };
        if action == Action::Quit {
            return Ok(state);
        }

        let size = session.size()?;
        let ctx = ViewContext::new(size.width, size.height, lhs, rhs, gap_half_width);
        repaint = state.apply(action, &ctx);
    }
}

/// Key bindings help screen.
pub fn commands_infobox() -> ChoiceList {
    let bindings = [
        ("Quit", "escape, q, Q, ctrl-c"),
        ("Scroll", "arrows, home, end, page up/down"),
        ("Toggle match highlighting", "d, D, h, H"),
        ("Toggle left/right pane lock", "space"),
        ("Toggle left/right pane scrolling", "tab"),
        ("Move pane separator right/left", "+/-"),
        ("Reset pane separator shift", "="),
    ];
    let body = vec![
        vec!["Commands available while the diff view is active:".to_string()],
        bindings
            .iter()
            .map(|(what, keys)| format!("{what:>32}:  {keys}"))
            .collect(),
        vec![
            "Matching rows are highlighted in the diff view.".to_string(),
            HIGHLIGHT_LIMITATION.to_string(),
        ],
    ];
    ChoiceList::infobox(APP_TITLE, body, "Press any key to return to the main menu . . .")
        .with_cursor(CursorMode::Block)
}

pub struct App<B: Backend + CursorShape, E: EventSource, F: FileSystem> {
    session: Session<B, E>,
    fs: F,
    config: SplitdiffConfig,
    state: AppState,
    /// Where the next file browser opens: the last directory browsed.
    browse_dir: DirectoryCursor,
    /// Working directory at startup, used when `browse_dir` can't be listed.
    start_dir: DirectoryCursor,
}

impl<B: Backend + CursorShape, E: EventSource, F: FileSystem> App<B, E, F> {
    pub fn new(session: Session<B, E>, fs: F, config: SplitdiffConfig, start_dir: DirectoryCursor) -> Self {
        let state = AppState::new(config.error_ticks);
        Self {
            session,
            fs,
            config,
            state,
            browse_dir: start_dir.clone(),
            start_dir,
        }
    }

    /// The interactive main menu. Returns when the user quits.
    pub fn run_menu(&mut self) -> Result<()> {
        tracing::info!("entering main menu");
        loop {
            let outcome = run_choice_list(&mut self.session, &mut self.state.menu)?;
            let MenuOutcome::Selected(index) = outcome else {
                return Ok(());
            };
            self.state.menu.clear_error();
            match MenuEntry::from_index(index) {
                Some(MenuEntry::SelectLeft) => self.browse_for(Side::Left)?,
                Some(MenuEntry::SelectRight) => self.browse_for(Side::Right)?,
                Some(MenuEntry::ShowDiff) => self.show_diff()?,
                Some(MenuEntry::ShowCommands) => self.show_commands()?,
                Some(MenuEntry::Quit) | None => return Ok(()),
            }
        }
    }

    /// Two-file mode: show the diff of files loaded up front.
    pub fn show_files(&mut self, left: LoadedFile, right: LoadedFile) -> Result<()> {
        self.state.set_file(Side::Left, left);
        self.state.set_file(Side::Right, right);
        self.show_diff()
    }

    fn browse_for(&mut self, side: Side) -> Result<()> {
        tracing::info!(side = side.label(), dir = ?self.browse_dir.path(), "entering file browser");
        let mut browser = match FileBrowser::open_nearest(
            &self.fs,
            self.browse_dir.clone(),
            &self.start_dir,
            APP_TITLE,
            self.config.error_ticks,
        ) {
            Ok(browser) => browser,
            Err(err) => {
                tracing::warn!(error = %err, "cannot open file browser");
                self.state.menu.set_error(err.banner_lines());
                return Ok(());
            }
        };

        let chosen = loop {
            match run_choice_list(&mut self.session, browser.list_mut())? {
                MenuOutcome::Selected(index) => {
                    if let BrowseStep::Chosen(file) = browser.select(index) {
                        break Some(file);
                    }
                }
                MenuOutcome::Cancelled | MenuOutcome::Dismissed => break None,
            }
        };
        self.browse_dir = browser.cursor().clone();

        match chosen {
            Some(file) => self.state.set_file(side, file),
            None => {
                tracing::info!(side = side.label(), "file browser cancelled");
                self.state.clear_file(side);
            }
        }
        Ok(())
    }

    fn show_diff(&mut self) -> Result<()> {
        let tab_width = self.config.tab_width;
        let inputs = self.state.diff_inputs().map(|(left, right)| {
            (
                LineSequence::normalize(&left.lines, tab_width),
                LineSequence::normalize(&right.lines, tab_width),
            )
        });
        let (lhs, rhs) = match inputs {
            Ok(sequences) => sequences,
            Err(message) => {
                self.state.menu.set_error([message]);
                return Ok(());
            }
        };

        tracing::info!(left_lines = lhs.len(), right_lines = rhs.len(), "entering diff view");
        let state = run_diff_view(
            &mut self.session,
            &lhs,
            &rhs,
            self.config.highlight,
            self.config.gap_half_width,
        )?;
        tracing::info!(left = ?state.left, right = ?state.right, "left diff view");
        Ok(())
    }

    fn show_commands(&mut self) -> Result<()> {
        let mut info = commands_infobox();
        run_choice_list(&mut self.session, &mut info)?;
        Ok(())
    }
}
