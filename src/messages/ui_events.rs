//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Table navigation
    SelectNext,
    SelectPrev,

    // Row actions
    EditSelected,
    NewEntry,
    DeleteSelected,
    Sync,

    // Dialog editing
    NextField,
    PrevField,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    SubmitDialog,
    CancelDialog,

    // Cosmetic
    ToggleTheme,

    // Popups
    ToggleHelp,
    CloseHelp,
    DismissAlert,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    /// Browsing the table
    #[default]
    Normal,
    /// Entry dialog is open and owns the keyboard
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    input_mode: InputMode,
    show_help: bool,
    show_alert: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Popups swallow the next key
    if show_alert {
        return Some(UiEvent::DismissAlert);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => handle_table_keys(key),
        InputMode::Editing => handle_dialog_keys(key),
    }
}

/// Handle keys while browsing the table
fn handle_table_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::EditSelected),
        KeyCode::Char('n') => Some(UiEvent::NewEntry),
        KeyCode::Char('d') => Some(UiEvent::DeleteSelected),
        KeyCode::Char('s') => Some(UiEvent::Sync),
        KeyCode::Char('t') => Some(UiEvent::ToggleTheme),
        _ => None,
    }
}

/// Handle keys while the entry dialog is open
fn handle_dialog_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::CancelDialog),
        KeyCode::Enter => Some(UiEvent::SubmitDialog),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_table_keys() {
        let map = |c| key_to_ui_event(press(c), InputMode::Normal, false, false);
        assert_eq!(map(KeyCode::Char('s')), Some(UiEvent::Sync));
        assert_eq!(map(KeyCode::Char('d')), Some(UiEvent::DeleteSelected));
        assert_eq!(map(KeyCode::Enter), Some(UiEvent::EditSelected));
        assert_eq!(map(KeyCode::Char('t')), Some(UiEvent::ToggleTheme));
        assert_eq!(map(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_dialog_takes_letters_as_input() {
        let map = |c| key_to_ui_event(press(c), InputMode::Editing, false, false);
        assert_eq!(map(KeyCode::Char('q')), Some(UiEvent::CharInput('q')));
        assert_eq!(map(KeyCode::Char('s')), Some(UiEvent::CharInput('s')));
        assert_eq!(map(KeyCode::Enter), Some(UiEvent::SubmitDialog));
        assert_eq!(map(KeyCode::Esc), Some(UiEvent::CancelDialog));
        assert_eq!(map(KeyCode::BackTab), Some(UiEvent::PrevField));
    }

    #[test]
    fn test_alert_swallows_keys_before_dialog() {
        let event = key_to_ui_event(press(KeyCode::Enter), InputMode::Editing, false, true);
        assert_eq!(event, Some(UiEvent::DismissAlert));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            key_to_ui_event(key, InputMode::Editing, true, true),
            Some(UiEvent::Quit)
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let key = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(key_to_ui_event(key, InputMode::Normal, false, false), None);
    }
}
