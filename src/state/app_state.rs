use super::browser::LoadedFile;
use super::choice_list::ChoiceList;
use super::viewport::Side;

pub const APP_TITLE: &str = "splitdiff - compare two text files side by side";

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    SelectLeft,
    SelectRight,
    ShowDiff,
    ShowCommands,
    Quit,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 5] = [
        MenuEntry::SelectLeft,
        MenuEntry::SelectRight,
        MenuEntry::ShowDiff,
        MenuEntry::ShowCommands,
        MenuEntry::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuEntry::SelectLeft => "Select the left-hand side file",
            MenuEntry::SelectRight => "Select the right-hand side file",
            MenuEntry::ShowDiff => "Show the diff between the files",
            MenuEntry::ShowCommands => "Show available commands for diff view",
            MenuEntry::Quit => "Quit",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn index(self) -> usize {
        self as usize
    }

    fn for_side(side: Side) -> Self {
        match side {
            Side::Left => MenuEntry::SelectLeft,
            Side::Right => MenuEntry::SelectRight,
        }
    }
}

/// State that lives for the whole menu-driven session: the main menu and
/// the two chosen files.
pub struct AppState {
    pub menu: ChoiceList,
    left: Option<LoadedFile>,
    right: Option<LoadedFile>,
}

impl AppState {
    pub fn new(error_ticks: u32) -> Self {
        let body = vec![
            vec![format!("splitdiff {}", env!("CARGO_PKG_VERSION"))],
            vec!["Choose an option from the menu below:".to_string()],
        ];
        let choices = MenuEntry::ALL.iter().map(|e| e.label().to_string()).collect();
        Self {
            menu: ChoiceList::new(APP_TITLE, body, choices).with_error_ticks(error_ticks),
            left: None,
            right: None,
        }
    }

    #[cfg(test)]
    pub fn file(&self, side: Side) -> Option<&LoadedFile> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    /// Record the file chosen for `side` and show its name in the menu.
    pub fn set_file(&mut self, side: Side, file: LoadedFile) {
        let entry = MenuEntry::for_side(side);
        self.menu.choices[entry.index()] = format!("{} (set to \"{}\")", entry.label(), file.name);
        match side {
            Side::Left => self.left = Some(file),
            Side::Right => self.right = Some(file),
        }
    }

    /// Forget the file chosen for `side` and restore the plain menu label.
    pub fn clear_file(&mut self, side: Side) {
        let entry = MenuEntry::for_side(side);
        self.menu.choices[entry.index()] = entry.label().to_string();
        let previous = match side {
            Side::Left => self.left.take(),
            Side::Right => self.right.take(),
        };
        if let Some(file) = previous {
            tracing::info!(side = side.label(), path = ?file.path, "file cleared");
        }
    }

    /// Both files, or the message explaining which are still missing.
    pub fn diff_inputs(&self) -> Result<(&LoadedFile, &LoadedFile), &'static str> {
        match (&self.left, &self.right) {
            (Some(left), Some(right)) => Ok((left, right)),
            (None, None) => Err("Left- and Right- side files must be selected first!"),
            (None, Some(_)) => Err("Left- side file must be selected first!"),
            (Some(_), None) => Err("Right- side file must be selected first!"),
        }
    }
}
