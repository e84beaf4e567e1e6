//! Normal mode: browsing the remote listing

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::state::app::App;

pub fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    // Resizing with Shift+Arrow keys
    if shift {
        match key.code {
            KeyCode::Up => {
                app.ui.grow_console();
                return;
            }
            KeyCode::Down => {
                app.ui.shrink_console();
                return;
            }
            KeyCode::Left => {
                app.ui.shrink_listing();
                return;
            }
            KeyCode::Right => {
                app.ui.grow_listing();
                return;
            }
            _ => {}
        }
    }

    match key.code {
        // Navigation
        KeyCode::Up => app.listing.move_up(),
        KeyCode::Down => app.listing.move_down(),
        KeyCode::PageUp => app.listing.page_up(),
        KeyCode::PageDown => app.listing.page_down(),
        KeyCode::Home => app.listing.move_home(),
        KeyCode::End => app.listing.move_end(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Backspace => app.go_up(),

        // Listing
        KeyCode::Char('r') | KeyCode::F(5) if !ctrl => app.refresh(),
        KeyCode::Char('g') => app.show_goto_dialog(),

        // Preview
        KeyCode::Char('p') => app.preview_selected(),
        KeyCode::Char('v') | KeyCode::F(3) => app.view_preview(),

        // Transfers
        KeyCode::Char('s') | KeyCode::F(2) => app.show_download_dialog(),
        KeyCode::F(7) => app.show_pull_dialog(),
        KeyCode::F(8) => app.show_push_dialog(),

        // Devices
        KeyCode::Char('d') => app.check_devices(),
        KeyCode::Char('R') => app.restart_server(),

        // Application
        KeyCode::Char('q') | KeyCode::F(10) => app.quit(),
        KeyCode::Char('c') if ctrl => app.quit(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adb::RemoteEntry;
    use crate::config::Config;
    use crate::state::events::SessionEvent;
    use crate::state::mode::{Mode, PromptKind};

    fn test_app() -> App {
        let mut config = Config::default();
        config.general.adb_path = "/nonexistent/adb-for-tests".to_string();
        let mut app = App::new(config);
        app.handle_event(SessionEvent::DirectoryLoaded {
            path: "/sdcard".to_string(),
            entries: vec![
                RemoteEntry::parent(),
                RemoteEntry::new("DCIM", true),
                RemoteEntry::new("notes.txt", false),
            ],
        });
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_normal_mode(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_cursor_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::End);
        assert_eq!(app.selected_entry().map(|e| e.name.as_str()), Some("notes.txt"));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_entry().map(|e| e.name.as_str()), Some("DCIM"));
        press(&mut app, KeyCode::Home);
        assert!(app.selected_entry().is_some_and(|e| e.is_parent()));
    }

    #[test]
    fn test_function_keys_open_dialogs() {
        let mut app = test_app();
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::F(2));
        assert!(matches!(app.mode, Mode::Prompt { kind: PromptKind::Download, ref target, .. }
            if target.as_deref() == Some("/sdcard/notes.txt")));

        app.mode = Mode::Normal;
        press(&mut app, KeyCode::F(8));
        assert!(matches!(app.mode, Mode::Prompt { kind: PromptKind::Push, ref fields, .. }
            if fields[1] == "/sdcard"));
    }

    #[test]
    fn test_shift_arrows_resize() {
        let mut app = test_app();
        let before = app.ui.listing_percent;
        handle_normal_mode(&mut app, KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT));
        assert_eq!(app.ui.listing_percent, before + 5);
        // Cursor did not move
        assert!(app.selected_entry().is_some_and(|e| e.is_parent()));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::F(10));
        assert!(app.should_quit);
    }
}
