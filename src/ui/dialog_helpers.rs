//! Dialog rendering helpers shared by the prompt and notice dialogs

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use super::Theme;

/// Pre-computed styles for dialog rendering.
pub struct DialogStyles {
    pub border: Style,
    pub title: Style,
    pub label: Style,
    pub input_focused: Style,
    /// Focused field whose whole text is selected
    pub input_selected: Style,
    pub input_unfocused: Style,
    pub button_focused: Style,
    pub button_unfocused: Style,
    pub help: Style,
    pub bg: Style,
}

impl DialogStyles {
    pub fn new(theme: &Theme, bg_color: Color, border_color: Color) -> Self {
        Self {
            border: Style::default().fg(border_color).bg(bg_color),
            title: Style::default().bg(bg_color).fg(theme.dialog_title).add_modifier(Modifier::BOLD),
            label: Style::default().bg(bg_color).fg(theme.dialog_text),
            input_focused: Style::default().bg(theme.dialog_input_focused_bg).fg(theme.dialog_input_focused_fg),
            input_selected: Style::default().bg(theme.dialog_input_selected_bg).fg(theme.dialog_input_selected_fg),
            input_unfocused: Style::default().bg(bg_color).fg(theme.dialog_input_unfocused_fg),
            button_focused: Style::default()
                .fg(theme.dialog_button_focused_fg)
                .bg(theme.dialog_button_focused_bg)
                .add_modifier(Modifier::BOLD),
            button_unfocused: Style::default().fg(theme.dialog_button_unfocused).bg(bg_color),
            help: Style::default().bg(bg_color).fg(theme.dialog_help),
            bg: Style::default().bg(bg_color),
        }
    }
}

pub struct DialogRenderer;

impl DialogRenderer {
    /// Centered dialog area, or None if the terminal is too small
    pub fn center_dialog(area: Rect, width: u16, height: u16, min_width: u16) -> Option<Rect> {
        if area.width < min_width || area.height < height {
            return None;
        }

        let dialog_width = width.min(area.width.saturating_sub(4));
        let x = area.x + (area.width.saturating_sub(dialog_width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;

        Some(Rect { x, y, width: dialog_width, height })
    }

    pub fn fill_background(area: Rect, buf: &mut Buffer, style: Style) {
        for row in area.y..area.y + area.height {
            for col in area.x..area.x + area.width {
                buf[(col, row)].set_char(' ').set_style(style);
            }
        }
    }

    /// Box-drawing border around the dialog
    pub fn draw_border(area: Rect, buf: &mut Buffer, style: Style) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        buf[(area.x, area.y)].set_char('┌').set_style(style);
        buf[(right, area.y)].set_char('┐').set_style(style);
        buf[(area.x, bottom)].set_char('└').set_style(style);
        buf[(right, bottom)].set_char('┘').set_style(style);
        for col in area.x + 1..right {
            buf[(col, area.y)].set_char('─').set_style(style);
            buf[(col, bottom)].set_char('─').set_style(style);
        }
        for row in area.y + 1..bottom {
            buf[(area.x, row)].set_char('│').set_style(style);
            buf[(right, row)].set_char('│').set_style(style);
        }
    }

    /// Centered title on the top border
    pub fn draw_title(area: Rect, buf: &mut Buffer, title: &str, style: Style) {
        let width = title.chars().count() as u16;
        let title_x = area.x + (area.width.saturating_sub(width)) / 2;
        buf.set_string(title_x, area.y, title, style);
    }

    /// Centered row of buttons, `(text, is_focused)`
    pub fn draw_buttons(
        area: Rect,
        buf: &mut Buffer,
        y_offset: u16,
        buttons: &[(&str, bool)],
        focused_style: Style,
        unfocused_style: Style,
    ) {
        let button_y = area.y + y_offset;
        let total_width: usize = buttons.iter().map(|(text, _)| text.chars().count()).sum::<usize>()
            + buttons.len().saturating_sub(1) * 2;

        let mut x = area.x + (area.width.saturating_sub(total_width as u16)) / 2;
        for (text, is_focused) in buttons {
            let style = if *is_focused { focused_style } else { unfocused_style };
            buf.set_string(x, button_y, text, style);
            x += text.chars().count() as u16 + 2;
        }
    }

    /// Draw a one-line input field, scrolled so the char cursor stays visible.
    /// Returns the cursor column relative to `x`.
    pub fn draw_input_field(buf: &mut Buffer, x: u16, y: u16, width: usize, text: &str, cursor: usize, style: Style) -> u16 {
        for col in x..x + width as u16 {
            buf[(col, y)].set_char(' ').set_style(style);
        }
        if width == 0 {
            return 0;
        }

        let (visible, cursor_col) = visible_window(text, cursor, width);
        buf.set_string(x, y, &visible, style);
        cursor_col as u16
    }

    /// Help text centered on the line above the bottom border
    pub fn draw_help(area: Rect, buf: &mut Buffer, text: &str, style: Style) {
        let width = text.chars().count() as u16;
        let help_x = area.x + (area.width.saturating_sub(width)) / 2;
        buf.set_string(help_x, area.y + area.height - 2, text, style);
    }
}

/// Slice of `text` that fits in `width` columns with the cursor visible
fn visible_window(text: &str, cursor: usize, width: usize) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());

    // The cursor may sit one past the last char, so it needs its own column
    let start = (cursor + 1).saturating_sub(width);
    let end = (start + width).min(chars.len());
    let mut shown: String = chars[start..end].iter().collect();
    if start > 0
        && let Some(first) = shown.chars().next()
    {
        shown.replace_range(..first.len_utf8(), "…");
    }
    (shown, cursor - start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_dialog() {
        let area = Rect { x: 0, y: 0, width: 80, height: 24 };
        let dialog = DialogRenderer::center_dialog(area, 40, 10, 20).unwrap();
        assert_eq!(dialog.width, 40);
        assert_eq!(dialog.height, 10);
        assert_eq!(dialog.x, 20);
        assert_eq!(dialog.y, 7);
    }

    #[test]
    fn test_center_dialog_too_small() {
        let area = Rect { x: 0, y: 0, width: 15, height: 24 };
        assert!(DialogRenderer::center_dialog(area, 40, 10, 20).is_none());
    }

    #[test]
    fn test_visible_window_short_text() {
        assert_eq!(visible_window("/sdcard", 3, 20), ("/sdcard".to_string(), 3));
    }

    #[test]
    fn test_visible_window_scrolls_to_cursor() {
        // Multi-byte chars must not split
        let text = "/sdcard/Müsic/Ålbum/song.mp3";
        let len = text.chars().count();
        let (shown, col) = visible_window(text, len, 10);
        assert_eq!(shown.chars().count(), 9);
        assert!(shown.starts_with('…'));
        assert!(shown.ends_with("song.mp3"));
        assert_eq!(col, 9);

        let (shown, col) = visible_window(text, 0, 10);
        assert_eq!(shown, "/sdcard/Mü");
        assert_eq!(col, 0);
    }
}
