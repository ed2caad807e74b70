use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::command::NavCommand;

/// Navigation command bound to a key press, if any.
///
/// `Esc` and `Backspace` act as the platform back button, `Home` pops the
/// root navigator to its base screen. Modifiers are not consulted.
pub fn key_command(event: &KeyEvent) -> Option<NavCommand> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    match event.code {
        KeyCode::Esc | KeyCode::Backspace => Some(NavCommand::back()),
        KeyCode::Home => Some(NavCommand::pop_to_top()),
        _ => None,
    }
}

/// Key press for a key name as sent by bridge clients (`"esc"`, `"home"`, ...).
/// Names without a navigation meaning map to [`KeyCode::Null`].
pub fn parse_key(name: &str) -> KeyEvent {
    let code = match name.to_ascii_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "backspace" | "back" => KeyCode::Backspace,
        "home" => KeyCode::Home,
        _ => KeyCode::Null,
    };
    KeyEvent::new(code, KeyModifiers::NONE)
}
