//! Action enum: all user-initiated intents flowing from components to the shell.

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    SearchBar,
    Results,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App applies them to `AppState`.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Query ────────────────────────────────────────────────────────────────
    /// The full text of the input after an edit, plus the cursor (in chars).
    QueryChanged { value: String, cursor: usize },
    /// Run a search for this text.
    Submit(String),

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),
    SelectUp(usize),
    SelectDown(usize),
    SelectFirst,
    SelectLast,
    /// Select the card at this index (mouse click).
    SelectIndex(usize),

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleTheme,
    ToggleHelp,
    ToggleKeys,
    CopyToClipboard(String),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
}
