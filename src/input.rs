use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::fmt;

/// Represents a key event with modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    /// The key code
    pub code: KeyCode,
    /// Modifier keys (ctrl, shift, alt)
    pub modifiers: KeyModifiers,
}

impl Key {
    /// Create a new Key instance
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a Key from a terminal key event, ignoring releases and repeats
    pub fn from_key_event(event: KeyEvent) -> Option<Self> {
        match event.kind {
            KeyEventKind::Press => Some(Self { code: event.code, modifiers: event.modifiers }),
            _ => None,
        }
    }

    /// Create a simple Key with no modifiers
    pub fn simple(code: KeyCode) -> Self {
        Self { code, modifiers: KeyModifiers::empty() }
    }

    /// Shorthand for an unmodified character key
    pub fn char(c: char) -> Self {
        Self::simple(KeyCode::Char(c))
    }

    /// Shorthand for a Ctrl-modified character key
    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Check if the key has Ctrl modifier
    pub fn has_ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Check if the key has Alt modifier
    pub fn has_alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key_str = match self.code {
            KeyCode::Backspace => "BS".to_string(),
            KeyCode::Enter => "CR".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "S-Tab".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Char(c) => c.to_string(),
            _ => format!("{:?}", self.code),
        };

        match (self.has_ctrl(), self.has_alt()) {
            (true, true) => write!(f, "C-A-{}", key_str),
            (true, false) => write!(f, "C-{}", key_str),
            (false, true) => write!(f, "A-{}", key_str),
            (false, false) => write!(f, "{}", key_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(Key::char('q').to_string(), "q");
        assert_eq!(Key::ctrl('c').to_string(), "C-c");
        assert_eq!(Key::simple(KeyCode::Esc).to_string(), "Esc");
        assert_eq!(Key::new(KeyCode::Enter, KeyModifiers::ALT).to_string(), "A-CR");
    }

    #[test]
    fn test_key_from_event_ignores_release() {
        let mut event = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(Key::from_key_event(event), Some(Key::char('n')));

        event.kind = KeyEventKind::Release;
        assert_eq!(Key::from_key_event(event), None);
    }
}
