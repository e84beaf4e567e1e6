//! Full-screen text viewer keys

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::state::app::App;
use crate::state::mode::Mode;

pub fn handle_viewing_mode(app: &mut App, key: KeyEvent, visible_height: usize) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let Mode::Viewing { lines, scroll, .. } = &mut app.mode else {
        return;
    };

    let max_scroll = lines.len().saturating_sub(visible_height);
    let half_page = (visible_height / 2).max(1);
    let page = visible_height.max(1);

    match key.code {
        KeyCode::Esc | KeyCode::F(3) | KeyCode::Char('q') | KeyCode::F(10) => {
            app.mode = Mode::Normal;
        }

        KeyCode::Up | KeyCode::Char('k') => {
            *scroll = scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            *scroll = (*scroll + 1).min(max_scroll);
        }

        // Half page - Ctrl+u / Ctrl+d (vim)
        KeyCode::Char('u') if ctrl => {
            *scroll = scroll.saturating_sub(half_page);
        }
        KeyCode::Char('d') if ctrl => {
            *scroll = (*scroll + half_page).min(max_scroll);
        }

        KeyCode::PageUp => {
            *scroll = scroll.saturating_sub(page);
        }
        KeyCode::PageDown | KeyCode::Char(' ') => {
            *scroll = (*scroll + page).min(max_scroll);
        }

        KeyCode::Home | KeyCode::Char('g') => {
            *scroll = 0;
        }
        KeyCode::End | KeyCode::Char('G') => {
            *scroll = max_scroll;
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn viewing_app(line_count: usize) -> App {
        let mut config = Config::default();
        config.general.adb_path = "/nonexistent/adb-for-tests".to_string();
        let mut app = App::new(config);
        let text: Vec<String> = (0..line_count).map(|i| format!("line {}", i)).collect();
        app.mode = Mode::viewing("/sdcard/a.txt", &text.join("\n"));
        app
    }

    fn scroll_of(app: &App) -> usize {
        match &app.mode {
            Mode::Viewing { scroll, .. } => *scroll,
            _ => panic!("expected viewer"),
        }
    }

    fn press(app: &mut App, code: KeyCode, height: usize) {
        handle_viewing_mode(app, KeyEvent::new(code, KeyModifiers::NONE), height);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut app = viewing_app(30);
        press(&mut app, KeyCode::PageDown, 10);
        assert_eq!(scroll_of(&app), 10);
        press(&mut app, KeyCode::End, 10);
        assert_eq!(scroll_of(&app), 20);
        press(&mut app, KeyCode::Down, 10);
        assert_eq!(scroll_of(&app), 20);
        press(&mut app, KeyCode::Home, 10);
        press(&mut app, KeyCode::Up, 10);
        assert_eq!(scroll_of(&app), 0);
    }

    #[test]
    fn test_short_file_does_not_scroll() {
        let mut app = viewing_app(3);
        press(&mut app, KeyCode::PageDown, 10);
        assert_eq!(scroll_of(&app), 0);
    }

    #[test]
    fn test_close_keys() {
        let mut app = viewing_app(3);
        press(&mut app, KeyCode::F(3), 10);
        assert!(matches!(app.mode, Mode::Normal));
    }
}
