use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Category of a key event, as routed by the interaction loop. Navigation
/// and the mode toggle behave identically in both modes; Submit, Backspace
/// and Insert are interpreted per mode by the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ScrollLineBack,
    ScrollLineForward,
    ScrollPageBack,
    ScrollPageForward,
    ToggleMode,
    Submit,
    Backspace,
    Insert(char),
    /// Ctrl+C. Raw mode swallows SIGINT, so the loop honors the
    /// termination signal itself.
    Interrupt,
}

/// Explicit dispatch table from raw key events to key categories. Events
/// the table does not know are ignored.
pub fn classify(key: KeyEvent) -> Option<KeyAction> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(KeyAction::Interrupt),
        (KeyCode::Up, _) => Some(KeyAction::ScrollLineBack),
        (KeyCode::Down, _) => Some(KeyAction::ScrollLineForward),
        (KeyCode::PageUp, _) => Some(KeyAction::ScrollPageBack),
        (KeyCode::PageDown, _) => Some(KeyAction::ScrollPageForward),
        (KeyCode::Esc, _) => Some(KeyAction::ToggleMode),
        (KeyCode::Enter, _) => Some(KeyAction::Submit),
        (KeyCode::Backspace, _) => Some(KeyAction::Backspace),
        (KeyCode::Char(c), modifiers)
            if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT =>
        {
            // The designated printable range: ASCII 0x20..=0x7E.
            if (' '..='~').contains(&c) {
                Some(KeyAction::Insert(c))
            } else {
                None
            }
        }
        _ => None,
    }
}
