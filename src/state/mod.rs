pub mod app_state;
pub mod browser;
pub mod choice_list;
pub mod viewport;

pub use app_state::{AppState, MenuEntry};
pub use browser::{BrowseStep, DirectoryCursor, FileBrowser, LoadedFile};
pub use choice_list::{ChoiceList, MenuOutcome};
pub use viewport::{Side, ViewContext, ViewportState};
