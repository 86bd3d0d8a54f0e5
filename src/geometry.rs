//! Column layout for the two side-by-side panes.
//!
//! Everything here is a pure function of its inputs: the layout is recomputed
//! from the current terminal size on every frame and never cached.

/// Inputs to [`compute_split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitParams {
    pub width: u16,
    pub height: u16,
    /// Widest line of the left content, in characters.
    pub left_content_width: usize,
    /// Widest line of the right content, in characters.
    pub right_content_width: usize,
    /// Signed offset of the pane boundary from the centre column.
    pub pane_shift: i32,
    /// Half of the blank gap between the panes.
    pub gap_half_width: u16,
}

/// The screen columns owned by one pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaneWindow {
    /// First screen column of the pane.
    pub x: u16,
    /// Visible column count. Zero when the pane is collapsed.
    pub width: u16,
    /// Largest horizontal scroll offset that still fills the pane.
    pub max_col: usize,
}

impl PaneWindow {
    fn new(x: i32, width: i32, content_width: usize) -> Self {
        let x = x.clamp(0, i32::from(u16::MAX)) as u16;
        let width = width.clamp(0, i32::from(u16::MAX)) as u16;
        Self {
            x,
            width,
            max_col: content_width.saturating_sub(usize::from(width)),
        }
    }

    fn hidden(content_width: usize) -> Self {
        Self::new(0, 0, content_width)
    }

    pub fn is_visible(&self) -> bool {
        self.width > 0
    }

    /// One past the last screen column of the pane.
    pub fn end(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

}

/// Result of [`compute_split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneSplit {
    /// Nominal boundary column (`width / 2 + pane_shift`).
    pub boundary: i32,
    pub left: PaneWindow,
    pub right: PaneWindow,
    /// Content rows below the label row.
    pub rows: u16,
}

impl PaneSplit {
    #[cfg(test)]
    /// True when one of the panes has been pushed off screen.
    pub fn is_collapsed(&self) -> bool {
        !self.left.is_visible() || !self.right.is_visible()
    }
}

/// Nominal boundary column for a terminal `width` and `pane_shift`.
pub fn boundary(width: u16, pane_shift: i32) -> i32 {
    i32::from(width) / 2 + pane_shift
}

/// Whether moving the boundary by `delta` columns keeps it inside the
/// `[gap, width - gap]` band where at most one pane is collapsed.
pub fn can_shift(width: u16, pane_shift: i32, gap_half_width: u16, delta: i32) -> bool {
    let middle = boundary(width, pane_shift);
    let gap = i32::from(gap_half_width);
    match delta.signum() {
        1 => middle < i32::from(width) - gap,
        -1 => middle > gap,
        _ => true,
    }
}

/// Split the terminal into the left and right pane windows.
///
/// When the boundary comes within `gap_half_width` of an edge the pane on
/// that side collapses and the survivor takes the full width.
pub fn compute_split(params: &SplitParams) -> PaneSplit {
    let width = i32::from(params.width);
    let gap = i32::from(params.gap_half_width);
    let boundary = boundary(params.width, params.pane_shift);

    let (left, right) = if boundary >= width - gap {
        (
            PaneWindow::new(0, width, params.left_content_width),
            PaneWindow::hidden(params.right_content_width),
        )
    } else if boundary <= gap {
        (
            PaneWindow::hidden(params.left_content_width),
            PaneWindow::new(0, width, params.right_content_width),
        )
    } else {
        (
            PaneWindow::new(0, boundary - gap, params.left_content_width),
            PaneWindow::new(
                boundary + gap,
                width - boundary - gap,
                params.right_content_width,
            ),
        )
    };

    PaneSplit {
        boundary,
        left,
        right,
        rows: params.height.saturating_sub(1),
    }
}
