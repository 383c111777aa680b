//! Keybinding definitions

use crossterm::event::KeyCode;

use curator_core::Direction;

/// Keybinding action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Toggle help
    ToggleHelp,
    /// Show the previous tab
    PrevTab,
    /// Show the next tab
    NextTab,
    /// Open the dropdown menu
    OpenMenu,
    /// Move focus to the next field
    NextField,
    /// Move focus to the previous field
    PrevField,
    /// Edit the focused field
    Edit,
    /// Check or uncheck the active record
    ToggleCheck,
    /// Flip the curated flag of the active record
    ToggleCurated,
    /// Flip the article's "needs work" flag
    ToggleNeedsWork,
    /// Save everything and add a compound
    Add,
    /// Delete the active or checked records
    Delete,
    /// Go to another article
    Navigate(Direction),
    /// Replace the source organism on every record
    ReplaceSource,
    /// Drop the targeted records without saving
    RemoveLocal,
    /// Append a blank record without saving
    NewBlank,
}

/// Get the action for a key in normal mode
pub fn normal_mode_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevTab),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::NextTab),
        KeyCode::Char('m') => Some(Action::OpenMenu),
        KeyCode::Tab => Some(Action::NextField),
        KeyCode::BackTab => Some(Action::PrevField),
        KeyCode::Char('i') | KeyCode::Enter => Some(Action::Edit),
        KeyCode::Char(' ') => Some(Action::ToggleCheck),
        KeyCode::Char('c') => Some(Action::ToggleCurated),
        KeyCode::Char('w') => Some(Action::ToggleNeedsWork),
        KeyCode::Char('a') => Some(Action::Add),
        KeyCode::Char('d') => Some(Action::Delete),
        KeyCode::Char('n') => Some(Action::Navigate(Direction::Next)),
        KeyCode::Char('p') => Some(Action::Navigate(Direction::Previous)),
        KeyCode::Char('r') => Some(Action::ReplaceSource),
        KeyCode::Char('x') => Some(Action::RemoveLocal),
        KeyCode::Char('+') => Some(Action::NewBlank),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            normal_mode_action(KeyCode::Char('n')),
            Some(Action::Navigate(Direction::Next))
        );
        assert_eq!(
            normal_mode_action(KeyCode::Char('p')),
            Some(Action::Navigate(Direction::Previous))
        );
        assert_eq!(normal_mode_action(KeyCode::Char('z')), None);
    }
}
