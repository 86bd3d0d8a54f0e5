//! Scroll state for the split diff view.

use crate::action::Action;
use crate::content::LineSequence;
use crate::geometry::{can_shift, compute_split, PaneSplit, PaneWindow, SplitParams};

/// Row offset of an unscrolled pane: screen row 1 shows content line 0.
pub const HOME_ROW: isize = -1;

/// Rows reserved out of each page jump.
const PAGE_OVERLAP: isize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Top-left corner of a pane's view into its content.
///
/// Screen row `i` (1-based) shows content line `row + i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: isize,
    pub col: usize,
}

impl Position {
    pub const HOME: Position = Position { row: HOME_ROW, col: 0 };
}

impl Default for Position {
    fn default() -> Self {
        Self::HOME
    }
}

/// Largest legal row offset: the one that puts the END sentinel on the last
/// visible row. `HOME_ROW` when the content and sentinel already fit.
pub fn max_row(len: usize, visible_rows: u16) -> isize {
    (len as isize - visible_rows as isize).max(HOME_ROW)
}

/// Everything the scroll commands are measured against, taken fresh from the
/// terminal before each command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewContext {
    pub width: u16,
    pub height: u16,
    pub left_len: usize,
    pub right_len: usize,
    pub left_width: usize,
    pub right_width: usize,
    pub gap_half_width: u16,
}

impl ViewContext {
    pub fn new(
        width: u16,
        height: u16,
        lhs: &LineSequence,
        rhs: &LineSequence,
        gap_half_width: u16,
    ) -> Self {
        Self {
            width,
            height,
            left_len: lhs.len(),
            right_len: rhs.len(),
            left_width: lhs.max_width(),
            right_width: rhs.max_width(),
            gap_half_width,
        }
    }

    pub fn split(&self, pane_shift: i32) -> PaneSplit {
        compute_split(&SplitParams {
            width: self.width,
            height: self.height,
            left_content_width: self.left_width,
            right_content_width: self.right_width,
            pane_shift,
            gap_half_width: self.gap_half_width,
        })
    }

    fn len(&self, side: Side) -> usize {
        match side {
            Side::Left => self.left_len,
            Side::Right => self.right_len,
        }
    }

    fn visible_rows(&self) -> u16 {
        self.height.saturating_sub(1)
    }

    fn page(&self) -> isize {
        (self.height as isize - PAGE_OVERLAP).max(1)
    }
}

/// Scroll positions of both panes plus the view toggles.
///
/// Created fresh for every diff view session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
    pub left: Position,
    pub right: Position,
    /// When false both panes scroll together.
    pub independent: bool,
    /// The pane that scrolls while `independent` is set.
    pub active: Side,
    pub highlight: bool,
    pub pane_shift: i32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ViewportState {
    pub fn new(highlight: bool) -> Self {
        Self {
            left: Position::HOME,
            right: Position::HOME,
            independent: false,
            active: Side::Left,
            highlight,
            pane_shift: 0,
        }
    }

    pub fn position(&self, side: Side) -> Position {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn position_mut(&mut self, side: Side) -> &mut Position {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Whether scroll commands currently move `side`.
    pub fn scrolls(&self, side: Side) -> bool {
        !self.independent || self.active == side
    }

    /// Apply one action. Returns true when the view must be redrawn, which
    /// is only when the state changed or the terminal was resized.
    pub fn apply(&mut self, action: Action, ctx: &ViewContext) -> bool {
        let before = *self;
        match action {
            Action::Resize => {
                self.clamp(ctx);
                return true;
            }
            Action::ToggleLock => self.independent = !self.independent,
            Action::SwitchSide => self.active = self.active.other(),
            Action::ToggleHighlight => self.highlight = !self.highlight,
            Action::ShiftPaneRight => {
                if can_shift(ctx.width, self.pane_shift, ctx.gap_half_width, 1) {
                    self.pane_shift += 1;
                }
            }
            Action::ShiftPaneLeft => {
                if can_shift(ctx.width, self.pane_shift, ctx.gap_half_width, -1) {
                    self.pane_shift -= 1;
                }
            }
            Action::ResetPaneShift => self.pane_shift = 0,
            Action::Home
            | Action::End
            | Action::PageUp
            | Action::PageDown
            | Action::Up
            | Action::Down
            | Action::Left
            | Action::Right => {
                let split = ctx.split(self.pane_shift);
                for side in [Side::Left, Side::Right] {
                    if self.scrolls(side) {
                        let window = match side {
                            Side::Left => split.left,
                            Side::Right => split.right,
                        };
                        scroll(self.position_mut(side), action, ctx, ctx.len(side), window);
                    }
                }
            }
            Action::Quit | Action::Confirm | Action::Dismiss => {}
        }
        let changed = *self != before;
        if changed {
            tracing::trace!(?action, left = ?self.left, right = ?self.right, "viewport updated");
        }
        changed
    }

    /// Pull both positions back into range after the terminal changed size.
    pub fn clamp(&mut self, ctx: &ViewContext) {
        let split = ctx.split(self.pane_shift);
        let rows = ctx.visible_rows();
        for (side, window) in [(Side::Left, split.left), (Side::Right, split.right)] {
            let limit = max_row(ctx.len(side), rows);
            let pos = self.position_mut(side);
            pos.row = pos.row.clamp(HOME_ROW, limit);
            if window.is_visible() {
                pos.col = pos.col.min(window.max_col);
            }
        }
    }
}

fn scroll(pos: &mut Position, action: Action, ctx: &ViewContext, len: usize, window: PaneWindow) {
    let limit = max_row(len, ctx.visible_rows());
    let page = ctx.page();
    match action {
        Action::Home => pos.row = HOME_ROW,
        Action::End => {
            if limit > HOME_ROW {
                pos.row = limit;
            }
        }
        Action::PageUp => pos.row = (pos.row - page).max(HOME_ROW),
        Action::PageDown => {
            if limit > HOME_ROW {
                pos.row = (pos.row + page).min(limit);
            }
        }
        Action::Up => {
            if pos.row > HOME_ROW {
                pos.row -= 1;
            }
        }
        Action::Down => {
            if pos.row < limit {
                pos.row += 1;
            }
        }
        Action::Left => pos.col = pos.col.saturating_sub(1),
        Action::Right => {
            if window.is_visible() && pos.col < window.max_col {
                pos.col += 1;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx(len: usize, height: u16) -> ViewContext {
        ViewContext {
            width: 80,
            height,
            left_len: len,
            right_len: len,
            left_width: 100,
            right_width: 30,
            gap_half_width: 2,
        }
    }

    #[test]
    fn test_up_at_home_stays_home() {
        let mut state = ViewportState::new(true);
        assert_eq!(state.left.row, HOME_ROW);
        let changed = state.apply(Action::Up, &ctx(100, 24));
        assert_eq!(state.left.row, HOME_ROW);
        assert_eq!(state.right.row, HOME_ROW);
        assert!(!changed);
    }

    #[test]
    fn test_max_row() {
        assert_eq!(max_row(100, 23), 77);
        assert_eq!(max_row(23, 23), 0);
        assert_eq!(max_row(22, 23), HOME_ROW);
        assert_eq!(max_row(0, 23), HOME_ROW);
        assert_eq!(max_row(5, 0), 5);
    }

    #[test]
    fn test_end_shows_sentinel_on_last_row() {
        let c = ctx(100, 24);
        let mut state = ViewportState::new(true);
        state.apply(Action::End, &c);
        // 23 visible rows: line 99 on screen row 22, END sentinel on row 23
        assert_eq!(state.left.row, 77);
        assert_eq!(state.left.row + 22, 99);
        assert_eq!(state.left.row + 23, 100);
        assert_eq!(state.right.row, 77);
    }

    #[test]
    fn test_end_is_noop_when_content_fits() {
        let mut state = ViewportState::new(true);
        assert!(!state.apply(Action::End, &ctx(10, 24)));
        assert_eq!(state.left.row, HOME_ROW);
    }

    #[test]
    fn test_down_stops_at_max_row() {
        let c = ctx(24, 24);
        let mut state = ViewportState::new(true);
        state.apply(Action::Down, &c);
        assert_eq!(state.left.row, 0);
        state.apply(Action::Down, &c);
        assert_eq!(state.left.row, 1);
        assert!(!state.apply(Action::Down, &c));
        assert_eq!(state.left.row, 1);
    }

    #[test]
    fn test_page_moves_by_height_minus_four() {
        let c = ctx(100, 24);
        let mut state = ViewportState::new(true);
        state.apply(Action::PageDown, &c);
        assert_eq!(state.left.row, 19);
        state.apply(Action::PageDown, &c);
        state.apply(Action::PageDown, &c);
        assert_eq!(state.left.row, 59);
        state.apply(Action::PageDown, &c);
        assert_eq!(state.left.row, 77);
        assert!(!state.apply(Action::PageDown, &c));
        state.apply(Action::PageUp, &c);
        assert_eq!(state.left.row, 57);
        for _ in 0..5 {
            state.apply(Action::PageUp, &c);
        }
        assert_eq!(state.left.row, HOME_ROW);
    }

    #[test]
    fn test_independent_scroll_moves_active_side_only() {
        let c = ctx(100, 24);
        let mut state = ViewportState::new(true);
        state.apply(Action::ToggleLock, &c);
        state.apply(Action::Down, &c);
        assert_eq!(state.left.row, 0);
        assert_eq!(state.right.row, HOME_ROW);

        state.apply(Action::SwitchSide, &c);
        state.apply(Action::End, &c);
        assert_eq!(state.left.row, 0);
        assert_eq!(state.right.row, 77);

        state.apply(Action::ToggleLock, &c);
        state.apply(Action::Home, &c);
        assert_eq!(state.left, Position::HOME);
        assert_eq!(state.right, Position::HOME);
    }

    #[test]
    fn test_switch_side_without_independent_scroll_moves_both() {
        let c = ctx(100, 24);
        let mut state = ViewportState::new(true);
        state.apply(Action::SwitchSide, &c);
        state.apply(Action::Down, &c);
        assert_eq!(state.left.row, 0);
        assert_eq!(state.right.row, 0);
    }

    #[test]
    fn test_horizontal_scroll_respects_pane_width() {
        let c = ctx(10, 24);
        let mut state = ViewportState::new(true);
        // left: 100 wide in 38 columns, right: 30 wide in 38 columns
        for _ in 0..200 {
            state.apply(Action::Right, &c);
        }
        assert_eq!(state.left.col, 62);
        assert_eq!(state.right.col, 0);
        state.apply(Action::Left, &c);
        assert_eq!(state.left.col, 61);
        for _ in 0..100 {
            state.apply(Action::Left, &c);
        }
        assert_eq!(state.left.col, 0);
    }

    #[test]
    fn test_hidden_pane_does_not_scroll_horizontally() {
        let c = ctx(10, 24);
        let mut state = ViewportState::new(true);
        state.pane_shift = 38;
        state.apply(Action::Right, &c);
        assert_eq!(state.right.col, 0);
        assert_eq!(state.left.col, 1);
    }

    #[test]
    fn test_pane_shift_bounds_and_reset() {
        let c = ctx(10, 24);
        let mut state = ViewportState::new(true);
        for _ in 0..100 {
            state.apply(Action::ShiftPaneRight, &c);
        }
        assert_eq!(state.pane_shift, 38);
        assert!(!state.apply(Action::ShiftPaneRight, &c));
        for _ in 0..200 {
            state.apply(Action::ShiftPaneLeft, &c);
        }
        assert_eq!(state.pane_shift, -38);
        assert!(state.apply(Action::ResetPaneShift, &c));
        assert_eq!(state.pane_shift, 0);
    }

    #[test]
    fn test_toggles() {
        let c = ctx(10, 24);
        let mut state = ViewportState::new(true);
        assert!(state.apply(Action::ToggleHighlight, &c));
        assert!(!state.highlight);
        assert!(state.apply(Action::ToggleLock, &c));
        assert!(state.independent);
        assert!(state.apply(Action::SwitchSide, &c));
        assert_eq!(state.active, Side::Right);
        assert!(state.scrolls(Side::Right));
        assert!(!state.scrolls(Side::Left));
    }

    #[test]
    fn test_non_viewport_actions_do_not_repaint() {
        let c = ctx(10, 24);
        let mut state = ViewportState::new(true);
        assert!(!state.apply(Action::Confirm, &c));
        assert!(!state.apply(Action::Dismiss, &c));
        assert_eq!(state, ViewportState::new(true));
    }

    #[test]
    fn test_resize_clamps_and_repaints() {
        let mut state = ViewportState::new(true);
        state.apply(Action::End, &ctx(100, 24));
        for _ in 0..70 {
            state.apply(Action::Right, &ctx(100, 24));
        }
        let taller = ViewContext {
            width: 120,
            ..ctx(100, 60)
        };
        assert!(state.apply(Action::Resize, &taller));
        assert_eq!(state.left.row, max_row(100, 59));
        assert_eq!(state.left.col, 42);
    }

    fn any_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Home),
            Just(Action::End),
            Just(Action::PageUp),
            Just(Action::PageDown),
            Just(Action::Up),
            Just(Action::Down),
            Just(Action::Left),
            Just(Action::Right),
            Just(Action::ToggleLock),
            Just(Action::SwitchSide),
            Just(Action::ShiftPaneLeft),
            Just(Action::ShiftPaneRight),
        ]
    }

    proptest! {
        #[test]
        fn rows_stay_in_range(
            len_left in 0usize..300,
            len_right in 0usize..300,
            height in 2u16..80,
            actions in prop::collection::vec(any_action(), 0..60),
        ) {
            let c = ViewContext { left_len: len_left, right_len: len_right, ..ctx(0, height) };
            let mut state = ViewportState::new(true);
            for action in actions {
                state.apply(action, &c);
                prop_assert!(state.left.row >= HOME_ROW);
                prop_assert!(state.right.row >= HOME_ROW);
                prop_assert!(state.left.row <= max_row(len_left, height - 1));
                prop_assert!(state.right.row <= max_row(len_right, height - 1));
            }
        }

        #[test]
        fn home_then_end_bounds_in_both_modes(
            len in 0usize..500,
            height in 2u16..80,
            independent in any::<bool>(),
        ) {
            let c = ctx(len, height);
            let mut state = ViewportState::new(true);
            state.independent = independent;
            state.apply(Action::End, &c);
            let expected = max_row(len, height - 1);
            prop_assert_eq!(state.left.row, expected);
            if len + 1 > usize::from(height - 1) {
                // sentinel lands on the last visible row
                prop_assert_eq!(state.left.row + (height as isize - 1), len as isize);
            }
            state.apply(Action::Home, &c);
            prop_assert_eq!(state.left.row, HOME_ROW);
        }
    }
}
