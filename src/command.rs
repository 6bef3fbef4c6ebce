//! Keyboard command parsing for focused editing surfaces.
//!
//! Separates "what key was pressed" from "what the surface does", so the
//! bindings are visible in one place and testable without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A user action on a focused editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MoveLineStart,
    MoveLineEnd,
    MoveDocStart,
    MoveDocEnd,

    // Navigation extending the selection (Shift modifier)
    MoveUpSelecting,
    MoveDownSelecting,
    MoveLeftSelecting,
    MoveRightSelecting,

    // Text editing
    InsertChar(char),
    InsertNewline,
    InsertIndent,
    Backspace,
    DeleteForward,

    // Undo/Redo
    Undo,
    Redo,

    // Word completion
    Complete,

    /// Save gesture: submit the host form
    Save,

    /// Unhandled key
    None,
}

/// Whether the key event is the save gesture (platform-conventional
/// modifier + `s`). Reserved while a surface has focus and checked before
/// any other binding.
pub fn is_save_gesture(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S'))
        && key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
}

impl InputCommand {
    /// Parse a key event into a command.
    pub fn from_key_event(key: KeyEvent) -> Self {
        // The save gesture binds at high priority, ahead of character input
        if is_save_gesture(&key) {
            return Self::Save;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Up, KeyModifiers::NONE) => Self::MoveUp,
            (KeyCode::Down, KeyModifiers::NONE) => Self::MoveDown,
            (KeyCode::Left, KeyModifiers::NONE) => Self::MoveLeft,
            (KeyCode::Right, KeyModifiers::NONE) => Self::MoveRight,
            (KeyCode::Up, KeyModifiers::SHIFT) => Self::MoveUpSelecting,
            (KeyCode::Down, KeyModifiers::SHIFT) => Self::MoveDownSelecting,
            (KeyCode::Left, KeyModifiers::SHIFT) => Self::MoveLeftSelecting,
            (KeyCode::Right, KeyModifiers::SHIFT) => Self::MoveRightSelecting,
            (KeyCode::Home, KeyModifiers::NONE) => Self::MoveLineStart,
            (KeyCode::End, KeyModifiers::NONE) => Self::MoveLineEnd,
            (KeyCode::Home, KeyModifiers::CONTROL) => Self::MoveDocStart,
            (KeyCode::End, KeyModifiers::CONTROL) => Self::MoveDocEnd,

            (KeyCode::Enter, KeyModifiers::NONE) => Self::InsertNewline,
            (KeyCode::Tab, KeyModifiers::NONE) => Self::InsertIndent,
            (KeyCode::Backspace, _) => Self::Backspace,
            (KeyCode::Delete, KeyModifiers::NONE) => Self::DeleteForward,

            (KeyCode::Char('z'), KeyModifiers::CONTROL) => Self::Undo,
            (KeyCode::Char('y'), KeyModifiers::CONTROL) => Self::Redo,
            (KeyCode::Char(' '), KeyModifiers::CONTROL) => Self::Complete,

            (KeyCode::Char(c), m) if m.is_empty() || m == KeyModifiers::SHIFT => {
                Self::InsertChar(c)
            }

            _ => Self::None,
        }
    }
}
