/// Central action enum: every state change in the diff view and the menus
/// flows through here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Lifecycle
    Quit,
    Resize,

    // Movement (diff view scrolling, menu selection)
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,

    // Diff view toggles
    ToggleLock,
    SwitchSide,
    ToggleHighlight,
    ShiftPaneRight,
    ShiftPaneLeft,
    ResetPaneShift,

    // Menus
    Confirm,
    Dismiss,
}
