//! Go-to, download, pull and push prompts

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::input::TextField;
use crate::state::app::App;
use crate::state::mode::Mode;

pub fn handle_prompt_mode(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let Mode::Prompt { kind, fields, cursors, focus, target } = &mut app.mode else {
        return;
    };

    let field_count = fields.len();
    // Fields, then OK, then Cancel
    let stops = field_count + 2;
    let on_field = *focus < field_count;

    match key.code {
        KeyCode::Esc => {
            app.ui.input_selected = false;
            app.mode = Mode::Normal;
        }

        KeyCode::Tab | KeyCode::Down => {
            *focus = (*focus + 1) % stops;
            app.ui.input_selected = *focus < field_count && !fields[*focus].is_empty();
        }

        KeyCode::BackTab | KeyCode::Up => {
            *focus = if *focus == 0 { stops - 1 } else { *focus - 1 };
            app.ui.input_selected = *focus < field_count && !fields[*focus].is_empty();
        }

        KeyCode::Enter => {
            app.ui.input_selected = false;
            let cancelled = *focus == field_count + 1;
            let (kind, fields, target) = (*kind, fields.clone(), target.take());
            app.mode = Mode::Normal;
            if !cancelled {
                app.submit_prompt(kind, &fields, target.as_deref());
            }
        }

        // Focus moves between buttons with the arrows
        KeyCode::Left if !on_field => {
            *focus = field_count;
        }
        KeyCode::Right if !on_field => {
            *focus = field_count + 1;
        }

        _ if on_field => {
            let input = &mut fields[*focus];
            let cursor = &mut cursors[*focus];
            edit_field(input, cursor, key.code, ctrl, &mut app.ui.input_selected);
        }

        _ => {}
    }
}

/// Text editing keys on the focused field
fn edit_field(input: &mut String, cursor: &mut usize, code: KeyCode, ctrl: bool, selected: &mut bool) {
    match code {
        KeyCode::Backspace | KeyCode::Delete if *selected => {
            input.clear();
            *cursor = 0;
        }
        KeyCode::Backspace => TextField::backspace(input, cursor),
        KeyCode::Delete => TextField::delete(input, *cursor),
        KeyCode::Left => TextField::left(cursor),
        KeyCode::Right => TextField::right(input, cursor),
        KeyCode::Home => TextField::home(cursor),
        KeyCode::End => TextField::end(input, cursor),
        KeyCode::Char('a') if ctrl => TextField::home(cursor),
        KeyCode::Char('e') if ctrl => TextField::end(input, cursor),
        KeyCode::Char('u') if ctrl => {
            input.clear();
            *cursor = 0;
        }
        KeyCode::Char('w') if ctrl => TextField::delete_word(input, cursor),
        KeyCode::Char(c) if !ctrl => {
            // Typing over a selection replaces it
            if *selected {
                input.clear();
                *cursor = 0;
            }
            TextField::insert_char(input, cursor, c);
        }
        _ => return,
    }
    *selected = false;
}

/// Bracketed paste into the focused field
pub fn paste_into_prompt(app: &mut App, text: &str) {
    let Mode::Prompt { fields, cursors, focus, .. } = &mut app.mode else {
        return;
    };
    let Some(input) = fields.get_mut(*focus) else {
        return;
    };
    let cursor = &mut cursors[*focus];
    if app.ui.input_selected {
        input.clear();
        *cursor = 0;
    }
    TextField::insert_str(input, cursor, text.trim_end_matches(['\n', '\r']));
    app.ui.input_selected = false;
}
