pub mod choice_list;
pub mod split_pane;

use ratatui::{layout::Rect, Frame};

use crate::theme::Theme;

/// Trait for renderable TUI components.
pub trait Component {
    type State;

    fn render(&self, frame: &mut Frame, area: Rect, state: &Self::State, theme: &Theme);
}

/// Write `text` at `(x, y)` relative to `area`, clipped to the area and to
/// `max_width` columns. Positions outside the area draw nothing.
pub(crate) fn put_str(
    frame: &mut Frame,
    area: Rect,
    x: u16,
    y: u16,
    text: &str,
    max_width: u16,
    style: ratatui::style::Style,
) {
    if x >= area.width || y >= area.height || text.is_empty() {
        return;
    }
    let room = (area.width - x).min(max_width);
    frame
        .buffer_mut()
        .set_stringn(area.x + x, area.y + y, text, usize::from(room), style);
}
