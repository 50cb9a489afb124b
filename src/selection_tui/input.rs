use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ports::presenter::NavigationDecision;
use crate::selection_tui::app::Menu;

const PAGE_SIZE: usize = 10;

/// Apply a key press to the menu.
///
/// Returns the operator's decision once one was made.
pub fn handle_key_event(menu: &mut Menu, key: KeyEvent) -> Option<NavigationDecision> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(NavigationDecision::Cancel)
        }
        KeyCode::Esc | KeyCode::Char('q') => Some(NavigationDecision::Cancel),
        KeyCode::Up | KeyCode::Char('k') => {
            menu.select_previous();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            menu.select_next();
            None
        }
        KeyCode::PageUp => {
            menu.page_up(PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            menu.page_down(PAGE_SIZE);
            None
        }
        KeyCode::Home => {
            menu.select_first();
            None
        }
        KeyCode::End => {
            menu.select_last();
            None
        }
        KeyCode::Enter => menu.current_decision(),
        KeyCode::Char('s') => shortcut(menu, NavigationDecision::Skip),
        KeyCode::Char('b') | KeyCode::Backspace => shortcut(menu, NavigationDecision::GoBack),
        _ => None,
    }
}

fn shortcut(menu: &Menu, decision: NavigationDecision) -> Option<NavigationDecision> {
    menu.offers(&decision).then_some(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candidate;
    use crate::matcher::rank;

    fn press(menu: &mut Menu, code: KeyCode) -> Option<NavigationDecision> {
        handle_key_event(menu, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn choices_menu() -> Menu {
        let candidates = (0..3)
            .map(|position| Candidate {
                title: format!("Song {}", position),
                artist: "Band".to_string(),
                href: format!("/songbook/song/{}/", position),
                position,
            })
            .collect();
        Menu::choices("Trying to match: Song 1 - Band", &rank("Song 1 - Band", candidates))
    }

    #[test]
    fn test_navigate_and_select() {
        let mut menu = choices_menu();

        assert_eq!(press(&mut menu, KeyCode::Down), None);
        assert_eq!(press(&mut menu, KeyCode::Up), None);
        let decision = press(&mut menu, KeyCode::Enter);
        assert!(matches!(
            decision,
            Some(NavigationDecision::Select(candidate)) if candidate.title == "Song 1"
        ));
    }

    #[test]
    fn test_enter_on_trailing_actions() {
        let mut menu = choices_menu();
        press(&mut menu, KeyCode::End);
        assert_eq!(press(&mut menu, KeyCode::Enter), Some(NavigationDecision::GoBack));
        press(&mut menu, KeyCode::Up);
        assert_eq!(press(&mut menu, KeyCode::Enter), Some(NavigationDecision::Skip));
    }

    #[test]
    fn test_shortcuts() {
        let mut menu = choices_menu();
        assert_eq!(press(&mut menu, KeyCode::Char('s')), Some(NavigationDecision::Skip));
        assert_eq!(press(&mut menu, KeyCode::Char('b')), Some(NavigationDecision::GoBack));
        assert_eq!(press(&mut menu, KeyCode::Char('q')), Some(NavigationDecision::Cancel));
        assert_eq!(
            handle_key_event(
                &mut menu,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Some(NavigationDecision::Cancel)
        );
    }

    #[test]
    fn test_confirm_menu() {
        let mut menu = Menu::confirm("Break time?");
        assert_eq!(press(&mut menu, KeyCode::Enter), Some(NavigationDecision::Confirm));
        press(&mut menu, KeyCode::Down);
        assert_eq!(press(&mut menu, KeyCode::Enter), Some(NavigationDecision::Skip));
        assert_eq!(press(&mut menu, KeyCode::Char('x')), None);
    }
}
