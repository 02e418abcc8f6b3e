//! Difficulty selection screen shown before the first game

use crate::difficulty::Difficulty;
use crossterm::event::KeyCode;

/// What the menu wants after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    Start(Difficulty),
    Quit,
}

/// Menu state
#[derive(Debug, Clone)]
pub struct Menu {
    pub selected: usize,
}

impl Menu {
    /// Open the menu with `preferred` highlighted
    pub fn new(preferred: Option<Difficulty>) -> Self {
        let selected = preferred
            .and_then(|d| Difficulty::all().iter().position(|&other| other == d))
            .unwrap_or(0);
        Self { selected }
    }

    pub fn items(&self) -> &'static [Difficulty] {
        Difficulty::all()
    }

    pub fn current(&self) -> Difficulty {
        self.items()[self.selected]
    }

    pub fn handle_key(&mut self, code: KeyCode) -> MenuAction {
        let count = self.items().len();
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = (self.selected + count - 1) % count;
                MenuAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % count;
                MenuAction::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => MenuAction::Start(self.current()),
            KeyCode::Char('1') => MenuAction::Start(Difficulty::Easy),
            KeyCode::Char('2') => MenuAction::Start(Difficulty::Medium),
            KeyCode::Char('3') => MenuAction::Start(Difficulty::Hard),
            KeyCode::Esc | KeyCode::Char('q') => MenuAction::Quit,
            _ => MenuAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferred_is_preselected() {
        assert_eq!(Menu::new(Some(Difficulty::Hard)).current(), Difficulty::Hard);
        assert_eq!(Menu::new(None).current(), Difficulty::Easy);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut menu = Menu::new(None);
        assert_eq!(menu.handle_key(KeyCode::Up), MenuAction::None);
        assert_eq!(menu.current(), Difficulty::Hard);
        menu.handle_key(KeyCode::Down);
        assert_eq!(menu.current(), Difficulty::Easy);
    }

    #[test]
    fn test_select() {
        let mut menu = Menu::new(None);
        menu.handle_key(KeyCode::Down);
        assert_eq!(menu.handle_key(KeyCode::Enter), MenuAction::Start(Difficulty::Medium));
        assert_eq!(menu.handle_key(KeyCode::Char('3')), MenuAction::Start(Difficulty::Hard));
        assert_eq!(menu.handle_key(KeyCode::Esc), MenuAction::Quit);
    }
}
