//! Event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::async_ops::AsyncCommand;
use super::state::{AppState, Mode, View};
use crate::screens::Route;
use crate::theme::Theme;

/// Handle key events, returning an optional async command
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    // Handle mode-specific input first
    match state.mode {
        Mode::ThemePicker => {
            handle_theme_picker_key(state, key);
            return None;
        }
        Mode::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                state.mode = Mode::Normal;
            }
            return None;
        }
        Mode::Input => return handle_input_key(state, key),
        Mode::Normal => {}
    }

    // Global shortcuts (work in normal mode)
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
            state.should_quit = true;
            return None;
        }
        (_, KeyCode::Char('?') | KeyCode::F(1)) => {
            state.mode = Mode::Help;
            return None;
        }
        (_, KeyCode::Tab | KeyCode::BackTab) => {
            state.next_drawer();
            return None;
        }
        (_, KeyCode::Char('1')) => {
            state.open_drawer(Route::Home);
            return None;
        }
        (_, KeyCode::Char('2')) => {
            state.open_drawer(Route::Search { query: None });
            return None;
        }
        (_, KeyCode::Char('t')) => {
            state.open_theme_picker();
            return None;
        }
        (_, KeyCode::Char('r')) => {
            return state.refresh().map(AsyncCommand::Fetch);
        }
        (_, KeyCode::Char('o')) => {
            state.open_in_browser();
            return None;
        }
        _ => {}
    }

    match state.view() {
        View::Home | View::Search => handle_list_key(state, key),
        View::Detail => handle_detail_key(state, key),
    }
}

fn handle_list_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('j') | KeyCode::Down) => state.select_next(),
        (_, KeyCode::Char('k') | KeyCode::Up) => state.select_prev(),
        (_, KeyCode::Char('g') | KeyCode::Home) => state.select_first(),
        (_, KeyCode::Char('G') | KeyCode::End) => state.select_last(),
        (_, KeyCode::Char('/' | 'i')) => {
            state.mode = Mode::Input;
            state.clear_status();
        }
        (KeyModifiers::CONTROL, KeyCode::Char('x')) => {
            return state.clear_input().map(AsyncCommand::Fetch);
        }
        (_, KeyCode::Enter) => return state.open_selected().map(AsyncCommand::Fetch),
        (_, KeyCode::Esc) => state.clear_status(),
        _ => {}
    }
    None
}

fn handle_detail_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left) => {
            state.back();
        }
        (_, KeyCode::Char('f')) => state.toggle_favorite(),
        (_, KeyCode::Char('j') | KeyCode::Down) => {
            state.detail_scroll = state.detail_scroll.saturating_add(1);
        }
        (_, KeyCode::Char('k') | KeyCode::Up) => {
            state.detail_scroll = state.detail_scroll.saturating_sub(1);
        }
        (KeyModifiers::CONTROL, KeyCode::Char('d')) | (_, KeyCode::PageDown) => {
            state.detail_scroll = state.detail_scroll.saturating_add(10);
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) | (_, KeyCode::PageUp) => {
            state.detail_scroll = state.detail_scroll.saturating_sub(10);
        }
        (_, KeyCode::Char('g') | KeyCode::Home) => state.detail_scroll = 0,
        _ => {}
    }
    None
}

fn handle_input_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            state.mode = Mode::Normal;
            None
        }
        (_, KeyCode::Enter) => {
            state.mode = Mode::Normal;
            state.submit_input().map(AsyncCommand::Fetch)
        }
        (KeyModifiers::CONTROL, KeyCode::Char('x')) => state.clear_input().map(AsyncCommand::Fetch),
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            state.should_quit = true;
            None
        }
        (_, KeyCode::Backspace) => {
            if let Some(input) = state.active_input() {
                input.backspace();
            }
            None
        }
        (_, KeyCode::Char(c)) => {
            if let Some(input) = state.active_input() {
                input.insert(c);
            }
            None
        }
        _ => None,
    }
}

fn handle_theme_picker_key(state: &mut AppState, key: KeyEvent) {
    let themes = Theme::all();
    let len = themes.len();

    match key.code {
        KeyCode::Esc => {
            // Cancel - restore the saved theme
            state.theme = state.config.theme;
            state.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            let selected_theme = Theme::from(themes[state.theme_picker_index]);
            state.theme = selected_theme;
            state.config.theme = selected_theme;

            state.mode = Mode::Normal;
            state.set_status(format!("✓ Theme set to {}", selected_theme.name()));
        }
        KeyCode::Down | KeyCode::Char('j') => {
            // Preview theme
            state.theme = Theme::from(themes[state.theme_picker_index]).next();
            state.theme_picker_index = (state.theme_picker_index + 1) % len;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.theme = Theme::from(themes[state.theme_picker_index]).prev();
            state.theme_picker_index = state.theme_picker_index.checked_sub(1).unwrap_or(len - 1);
        }
        KeyCode::Home | KeyCode::Char('g') => {
            state.theme_picker_index = 0;
            state.theme = Theme::from(themes[state.theme_picker_index]);
        }
        KeyCode::End | KeyCode::Char('G') => {
            state.theme_picker_index = len - 1;
            state.theme = Theme::from(themes[state.theme_picker_index]);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::favorites::FavoritesStore;
    use crate::screens::FetchRequest;
    use tempfile::{TempDir, tempdir};

    fn state() -> (AppState, TempDir) {
        let dir = tempdir().unwrap();
        let favorites = FavoritesStore::open_path(&dir.path().join("favorites.sqlite")).unwrap();
        (AppState::new(Config::default(), favorites).unwrap(), dir)
    }

    fn press(state: &mut AppState, code: KeyCode) -> Option<AsyncCommand> {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_quit() {
        let (mut state, _dir) = state();
        press(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);
    }

    #[test]
    fn test_typing_and_submit() {
        let (mut state, _dir) = state();
        press(&mut state, KeyCode::Char('/'));
        assert_eq!(state.mode, Mode::Input);

        // 'q' is text while typing, not quit
        for c in "qnaruto".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        press(&mut state, KeyCode::Backspace);
        assert!(!state.should_quit);
        assert_eq!(state.home_input.text(), "qnarut");

        let cmd = press(&mut state, KeyCode::Enter);
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.view(), View::Search);
        assert!(matches!(
            cmd,
            Some(AsyncCommand::Fetch(FetchRequest::Search { ref query, .. })) if query == "qnarut"
        ));
    }

    #[test]
    fn test_refresh_key_issues_request() {
        let (mut state, _dir) = state();
        let cmd = press(&mut state, KeyCode::Char('r'));
        assert!(matches!(
            cmd,
            Some(AsyncCommand::Fetch(FetchRequest::TopAnime { .. }))
        ));
        assert!(state.home.state().is_refreshing);
    }

    #[test]
    fn test_tab_switches_drawer() {
        let (mut state, _dir) = state();
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.view(), View::Search);
        press(&mut state, KeyCode::Char('1'));
        assert_eq!(state.view(), View::Home);
    }

    #[test]
    fn test_theme_picker_cancel_restores() {
        let (mut state, _dir) = state();
        let saved = state.theme;
        press(&mut state, KeyCode::Char('t'));
        assert_eq!(state.mode, Mode::ThemePicker);
        press(&mut state, KeyCode::Down);
        assert_ne!(state.theme, saved);
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.theme, saved);
        assert_eq!(state.mode, Mode::Normal);
    }
}
