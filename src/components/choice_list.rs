use ratatui::{layout::Rect, style::Style, Frame};

use crate::state::choice_list::{ChoiceList, INDENT};
use crate::theme::Theme;
use crate::tui::CursorMode;

use super::{put_str, Component};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStyle {
    Title,
    Body,
    Error,
    Item,
    Selected,
}

impl MenuStyle {
    fn style(self, theme: &Theme) -> Style {
        match self {
            MenuStyle::Title => theme.title_style(),
            MenuStyle::Body | MenuStyle::Item => theme.item_style(),
            MenuStyle::Error => theme.error_style(),
            MenuStyle::Selected => theme.selected_item_style(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLine {
    pub row: u16,
    pub col: u16,
    pub text: String,
    pub style: MenuStyle,
}

/// Left margin that centres the whole block when it is narrower than the
/// screen.
fn left_shift(list: &ChoiceList, width: u16) -> u16 {
    let content = list.content_width();
    let width = usize::from(width);
    if content < width {
        ((width - content) / 2) as u16
    } else {
        0
    }
}

fn row(index: usize) -> u16 {
    u16::try_from(index).unwrap_or(u16::MAX)
}

/// Lay out the title, body, error banner and the visible slice of choices.
pub fn menu_lines(list: &ChoiceList, width: u16, height: u16) -> Vec<MenuLine> {
    let lshift = left_shift(list, width);
    let indent = lshift.saturating_add(INDENT);
    let mut lines = vec![MenuLine {
        row: 0,
        col: lshift,
        text: list.title.clone(),
        style: MenuStyle::Title,
    }];

    let mut linenum = 2;
    for section in &list.body {
        for text in section {
            lines.push(MenuLine {
                row: row(linenum),
                col: indent,
                text: text.clone(),
                style: MenuStyle::Body,
            });
            linenum += 1;
        }
        linenum += 1;
    }

    if let Some(banner) = list.error() {
        for text in banner.lines() {
            lines.push(MenuLine {
                row: row(linenum),
                col: indent,
                text: text.clone(),
                style: MenuStyle::Error,
            });
            linenum += 1;
        }
        linenum += 1;
    }

    let choices = list.choices.iter().enumerate().skip(list.topline());
    for (i, text) in choices {
        if linenum >= usize::from(height) {
            break;
        }
        let style = if i == list.selection() && !list.infobox {
            MenuStyle::Selected
        } else {
            MenuStyle::Item
        };
        lines.push(MenuLine {
            row: row(linenum),
            col: indent,
            text: text.clone(),
            style,
        });
        linenum += 1;
    }
    lines
}

/// Where the hardware cursor sits: just past the selected choice. `None`
/// when the cursor is hidden or would fall off screen.
pub fn cursor_position(list: &ChoiceList, width: u16, height: u16) -> Option<(u16, u16)> {
    if list.cursor == CursorMode::Hidden {
        return None;
    }
    let choice = list.choices.get(list.selection())?;
    let col = usize::from(left_shift(list, width)) + usize::from(INDENT) + choice.chars().count();
    let row = list.header_rows() + list.selection().checked_sub(list.topline())?;
    if col < usize::from(width) && row < usize::from(height) {
        Some((col as u16, row as u16))
    } else {
        None
    }
}

pub struct ChoiceListView;

impl Component for ChoiceListView {
    type State = ChoiceList;

    fn render(&self, frame: &mut Frame, area: Rect, list: &ChoiceList, theme: &Theme) {
        for line in menu_lines(list, area.width, area.height) {
            put_str(
                frame,
                area,
                line.col,
                line.row,
                &line.text,
                u16::MAX,
                line.style.style(theme),
            );
        }
        if let Some((x, y)) = cursor_position(list, area.width, area.height) {
            frame.set_cursor_position((area.x + x, area.y + y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn sample() -> ChoiceList {
        ChoiceList::new(
            "Menu",
            vec![vec!["pick one".into()]],
            vec!["a".into(), "bb".into()],
        )
    }

    #[test]
    fn test_layout_is_centred_and_indented() {
        // widest line is 8 columns, so a 20-wide screen shifts by 6
        let lines = menu_lines(&sample(), 20, 10);
        let at = |text: &str| {
            lines
                .iter()
                .find(|l| l.text == text)
                .map(|l| (l.row, l.col, l.style))
        };
        assert_eq!(at("Menu"), Some((0, 6, MenuStyle::Title)));
        assert_eq!(at("pick one"), Some((2, 10, MenuStyle::Body)));
        assert_eq!(at("a"), Some((4, 10, MenuStyle::Selected)));
        assert_eq!(at("bb"), Some((5, 10, MenuStyle::Item)));
    }

    #[test]
    fn test_error_sits_between_body_and_choices() {
        let mut list = sample();
        list.set_error(["bad", "", "worse"]);
        let lines = menu_lines(&list, 40, 20);
        let errors: Vec<(u16, &str)> = lines
            .iter()
            .filter(|l| l.style == MenuStyle::Error)
            .map(|l| (l.row, l.text.as_str()))
            .collect();
        assert_eq!(errors, vec![(4, "bad"), (5, "worse")]);
        let first_choice = lines.iter().find(|l| l.text == "a").unwrap();
        assert_eq!(first_choice.row, 7);
    }

    #[test]
    fn test_choices_stop_at_bottom_row() {
        let items: Vec<String> = (0..30).map(|i| format!("item {i}")).collect();
        let mut list = ChoiceList::new("T", vec![], items);
        list.handle(Action::End, 8);
        let lines = menu_lines(&list, 40, 8);
        let shown: Vec<&str> = lines
            .iter()
            .filter(|l| l.row >= 2)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(shown, vec!["item 24", "item 25", "item 26", "item 27", "item 28", "item 29"]);
        assert!(lines.iter().all(|l| l.row < 8));
    }

    #[test]
    fn test_cursor_follows_selection() {
        let mut list = sample().with_cursor(CursorMode::Block);
        assert_eq!(cursor_position(&list, 20, 10), Some((11, 4)));
        list.handle(Action::Down, 10);
        assert_eq!(cursor_position(&list, 20, 10), Some((12, 5)));
        assert_eq!(cursor_position(&sample(), 20, 10), None);
    }

    #[test]
    fn test_cursor_off_screen_is_dropped() {
        let list = ChoiceList::new("T", vec![], vec!["x".repeat(30)]).with_cursor(CursorMode::Block);
        assert_eq!(cursor_position(&list, 30, 10), None);
    }

    #[test]
    fn test_renders_to_buffer() {
        let theme = Theme::default();
        let list = sample();
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                ChoiceListView.render(frame, area, &list, &theme)
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(row_text(buffer, 0), "      Menu");
        assert_eq!(row_text(buffer, 2), "          pick one");
        assert_eq!(row_text(buffer, 4), "          a");
        assert_eq!(buffer[(10, 4)].fg, theme.item);
        assert!(buffer[(10, 4)].modifier.contains(ratatui::style::Modifier::BOLD));
        assert!(!buffer[(10, 5)].modifier.contains(ratatui::style::Modifier::BOLD));
    }

    #[test]
    fn test_tiny_screen_does_not_panic() {
        let theme = Theme::default();
        let mut list = sample();
        list.set_error(["an error message wider than the screen"]);
        let mut terminal = Terminal::new(TestBackend::new(3, 2)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                ChoiceListView.render(frame, area, &list, &theme)
            })
            .unwrap();
    }
}
