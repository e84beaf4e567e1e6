//! Input handling
//!
//! Dispatches keys and pastes based on the current application mode.

mod dialogs;
mod normal;
mod text_field;
mod viewing;

pub use text_field::TextField;

use crossterm::event::KeyEvent;

use crate::state::app::App;
use crate::state::mode::Mode;

/// Handle a key event based on current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match &app.mode {
        Mode::Normal => normal::handle_normal_mode(app, key),
        Mode::Viewing { .. } => {
            let height = app.ui.viewer_height;
            viewing::handle_viewing_mode(app, key, height);
        }
        Mode::Prompt { .. } => dialogs::handle_prompt_mode(app, key),
        Mode::Notice { .. } => dialogs::handle_notice_mode(app, key),
    }
}

/// Handle bracketed paste: text into the focused prompt field, or dropped
/// local files to push in normal mode
pub fn handle_paste(app: &mut App, text: &str) {
    match &app.mode {
        Mode::Normal => app.paste_paths(text),
        Mode::Prompt { .. } => dialogs::paste_into_prompt(app, text),
        Mode::Viewing { .. } | Mode::Notice { .. } => {}
    }
}
