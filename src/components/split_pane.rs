use ratatui::{layout::Rect, style::Style, Frame};

use crate::content::{char_window, LineSequence};
use crate::geometry::{PaneSplit, PaneWindow};
use crate::highlight::match_mask;
use crate::state::viewport::{Side, ViewContext, ViewportState};
use crate::theme::Theme;

use super::{put_str, Component};

pub const END_LABEL: &str = "END";

/// Columns between the right edge and the start of the `right` label.
const RIGHT_LABEL_INSET: u16 = 6;

/// Columns between the right edge and the right pane's END sentinel.
const RIGHT_END_INSET: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Normal,
    Matched,
    Label,
    /// Label of the pane that scrolls in independent mode.
    ActiveLabel,
    Sentinel,
}

impl CellStyle {
    fn style(self, theme: &Theme) -> Style {
        match self {
            CellStyle::Normal => theme.text_style(),
            CellStyle::Matched => theme.matched_style(),
            CellStyle::Label | CellStyle::Sentinel => theme.info_style(),
            CellStyle::ActiveLabel => theme.accent_style(),
        }
    }
}

/// One run of text to draw, in screen coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneCell {
    pub row: u16,
    pub col: u16,
    pub text: String,
    /// Columns the text may occupy before it is clipped.
    pub max_width: u16,
    pub style: CellStyle,
}

fn window(split: &PaneSplit, side: Side) -> PaneWindow {
    match side {
        Side::Left => split.left,
        Side::Right => split.right,
    }
}

/// Everything the split view draws for one frame.
///
/// Row 0 holds the pane labels. Screen row `i` shows line `row + i` of each
/// pane, the END sentinel on the row just past the last line, and nothing
/// below that.
pub fn pane_cells(
    lhs: &LineSequence,
    rhs: &LineSequence,
    state: &ViewportState,
    split: &PaneSplit,
    width: u16,
) -> Vec<PaneCell> {
    let mut cells = Vec::new();

    for side in [Side::Left, Side::Right] {
        if !window(split, side).is_visible() {
            continue;
        }
        let col = match side {
            Side::Left => 1,
            Side::Right => width.saturating_sub(RIGHT_LABEL_INSET),
        };
        let style = if state.independent && state.active == side {
            CellStyle::ActiveLabel
        } else {
            CellStyle::Label
        };
        cells.push(PaneCell {
            row: 0,
            col,
            text: side.label().to_string(),
            max_width: width,
            style,
        });
    }

    let mask = match_mask(
        lhs,
        state.left.row,
        rhs,
        state.right.row,
        split.rows,
        state.highlight,
    );

    for (i, matched) in (1..=split.rows).zip(mask) {
        for (side, seq) in [(Side::Left, lhs), (Side::Right, rhs)] {
            let pane = window(split, side);
            if !pane.is_visible() {
                continue;
            }
            let pos = state.position(side);
            let index = pos.row + i as isize;
            if let Some(line) = seq.line(index) {
                let text = char_window(line, pos.col, usize::from(pane.width));
                if text.is_empty() {
                    continue;
                }
                cells.push(PaneCell {
                    row: i,
                    col: pane.x,
                    text,
                    max_width: pane.width,
                    style: if matched {
                        CellStyle::Matched
                    } else {
                        CellStyle::Normal
                    },
                });
            } else if index == seq.len() as isize {
                let col = match side {
                    Side::Left => pane.x + 1,
                    Side::Right => pane.end().saturating_sub(RIGHT_END_INSET),
                };
                cells.push(PaneCell {
                    row: i,
                    col,
                    text: END_LABEL.to_string(),
                    max_width: pane.end().saturating_sub(col),
                    style: CellStyle::Sentinel,
                });
            }
        }
    }
    cells
}

/// The side-by-side view of two line sequences.
pub struct SplitPane<'a> {
    pub lhs: &'a LineSequence,
    pub rhs: &'a LineSequence,
    pub gap_half_width: u16,
}

impl Component for SplitPane<'_> {
    type State = ViewportState;

    fn render(&self, frame: &mut Frame, area: Rect, state: &ViewportState, theme: &Theme) {
        // layout comes from this frame's size, never from an earlier one
        let ctx = ViewContext::new(area.width, area.height, self.lhs, self.rhs, self.gap_half_width);
        let split = ctx.split(state.pane_shift);
        for cell in pane_cells(self.lhs, self.rhs, state, &split, area.width) {
            put_str(
                frame,
                area,
                cell.col,
                cell.row,
                &cell.text,
                cell.max_width,
                cell.style.style(theme),
            );
        }
    }
}
