use crossterm::event::{KeyCode, KeyEvent};

use crate::state::app::App;
use crate::state::mode::Mode;

pub fn handle_notice_mode(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.mode = Mode::Normal;
    }
}
