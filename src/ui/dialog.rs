//! Prompt and notice dialogs

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::state::mode::PromptKind;
use super::Theme;
use super::dialog_helpers::{DialogRenderer, DialogStyles};

const PROMPT_WIDTH: u16 = 64;
const PROMPT_HELP: &str = "Tab=Switch  Enter=Select  Esc=Cancel";

/// Rows taken by one labelled field (label, input, blank)
const FIELD_ROWS: u16 = 3;

fn prompt_height(kind: PromptKind) -> u16 {
    // Border, blank, fields, buttons, blank, help, border
    2 + 1 + FIELD_ROWS * kind.labels().len() as u16 + 1 + 1 + 1
}

/// Text prompt with one input per label, plus OK and Cancel buttons.
///
/// `focus` indexes the fields first, then OK, then Cancel.
pub struct PromptDialog<'a> {
    kind: PromptKind,
    fields: &'a [String],
    cursors: &'a [usize],
    focus: usize,
    input_selected: bool,
    theme: &'a Theme,
}

impl<'a> PromptDialog<'a> {
    pub fn new(
        kind: PromptKind,
        fields: &'a [String],
        cursors: &'a [usize],
        focus: usize,
        input_selected: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { kind, fields, cursors, focus, input_selected, theme }
    }

    /// Terminal position of the text cursor, if a field has focus
    pub fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        if self.focus >= self.fields.len() {
            return None;
        }
        let dialog = DialogRenderer::center_dialog(area, PROMPT_WIDTH, prompt_height(self.kind), 20)?;
        let (x, y, width) = field_geometry(dialog, self.focus);
        // Rendering into a scratch buffer gives the scrolled cursor column
        let mut scratch = Buffer::empty(Rect::new(x, y, width as u16, 1));
        let col = DialogRenderer::draw_input_field(
            &mut scratch,
            x,
            y,
            width,
            &self.fields[self.focus],
            self.cursors.get(self.focus).copied().unwrap_or(0),
            Style::default(),
        );
        Some((x + col, y))
    }
}

/// Input x, y and width of field `index` inside the dialog
fn field_geometry(dialog: Rect, index: usize) -> (u16, u16, usize) {
    let x = dialog.x + 2;
    let y = dialog.y + 2 + index as u16 * FIELD_ROWS + 1;
    (x, y, dialog.width.saturating_sub(4) as usize)
}

impl Widget for PromptDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(dialog_area) = DialogRenderer::center_dialog(area, PROMPT_WIDTH, prompt_height(self.kind), 20) else {
            return;
        };

        let styles = DialogStyles::new(self.theme, self.theme.dialog_bg, self.theme.dialog_border);
        DialogRenderer::fill_background(dialog_area, buf, styles.bg);
        DialogRenderer::draw_border(dialog_area, buf, styles.border);
        DialogRenderer::draw_title(dialog_area, buf, self.kind.title(), styles.title);

        for (i, label) in self.kind.labels().iter().enumerate() {
            let (x, y, width) = field_geometry(dialog_area, i);
            buf.set_string(x, y - 1, label, styles.label);

            let style = if self.focus == i {
                if self.input_selected { styles.input_selected } else { styles.input_focused }
            } else {
                styles.input_unfocused
            };
            let text = self.fields.get(i).map(String::as_str).unwrap_or("");
            let cursor = self.cursors.get(i).copied().unwrap_or(0);
            DialogRenderer::draw_input_field(buf, x, y, width, text, cursor, style);
        }

        let fields = self.fields.len();
        let ok = format!("[ {} ]", self.kind.ok_label());
        let buttons_y = 2 + FIELD_ROWS * self.kind.labels().len() as u16;
        DialogRenderer::draw_buttons(
            dialog_area,
            buf,
            buttons_y,
            &[(ok.as_str(), self.focus == fields), ("[ Cancel ]", self.focus == fields + 1)],
            styles.button_focused,
            styles.button_unfocused,
        );

        DialogRenderer::draw_help(dialog_area, buf, PROMPT_HELP, styles.help);
    }
}

/// Message box with a single OK button
pub struct NoticeDialog<'a> {
    title: &'a str,
    lines: &'a [String],
    theme: &'a Theme,
}

impl<'a> NoticeDialog<'a> {
    pub fn new(title: &'a str, lines: &'a [String], theme: &'a Theme) -> Self {
        Self { title, lines, theme }
    }
}

impl Widget for NoticeDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let longest = self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
        let width = (longest + 6).max(self.title.chars().count() as u16 + 6).max(30);
        // Border, blank, lines, blank, button, border
        let height = self.lines.len() as u16 + 5;
        let Some(dialog_area) = DialogRenderer::center_dialog(area, width, height, 20) else {
            return;
        };

        let styles = DialogStyles::new(self.theme, self.theme.dialog_notice_bg, self.theme.dialog_notice_border);
        DialogRenderer::fill_background(dialog_area, buf, styles.bg);
        DialogRenderer::draw_border(dialog_area, buf, styles.border);
        DialogRenderer::draw_title(dialog_area, buf, self.title, styles.title);

        let max = dialog_area.width.saturating_sub(4) as usize;
        for (i, line) in self.lines.iter().enumerate() {
            let shown: String = line.chars().take(max).collect();
            buf.set_string(dialog_area.x + 2, dialog_area.y + 2 + i as u16, &shown, styles.label);
        }

        DialogRenderer::draw_buttons(
            dialog_area,
            buf,
            dialog_area.height - 2,
            &[("[ OK ]", true)],
            styles.button_focused,
            styles.button_unfocused,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(buf: &Buffer, area: Rect) -> String {
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_pull_prompt_renders_both_fields() {
        let theme = Theme::default();
        let fields = vec!["/sdcard/a.txt".to_string(), "/tmp".to_string()];
        let cursors = vec![13, 4];
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        PromptDialog::new(PromptKind::Pull, &fields, &cursors, 2, false, &theme).render(area, &mut buf);

        let text = screen(&buf, area);
        assert!(text.contains("Pull from device"));
        assert!(text.contains("Remote path:"));
        assert!(text.contains("Local path:"));
        assert!(text.contains("/sdcard/a.txt"));
        assert!(text.contains("[ Pull ]"));
        assert!(text.contains("[ Cancel ]"));
    }

    #[test]
    fn test_cursor_position_follows_focus() {
        let theme = Theme::default();
        let fields = vec!["/sdcard".to_string(), String::new()];
        let cursors = vec![7, 0];
        let area = Rect::new(0, 0, 80, 24);

        let first = PromptDialog::new(PromptKind::Pull, &fields, &cursors, 0, false, &theme)
            .cursor_position(area)
            .unwrap();
        let second = PromptDialog::new(PromptKind::Pull, &fields, &cursors, 1, false, &theme)
            .cursor_position(area)
            .unwrap();
        assert_eq!(second.1, first.1 + FIELD_ROWS);
        assert_eq!(first.0, second.0 + 7);

        // Buttons have no text cursor
        assert!(PromptDialog::new(PromptKind::Pull, &fields, &cursors, 2, false, &theme)
            .cursor_position(area)
            .is_none());
    }

    #[test]
    fn test_notice_shows_lines() {
        let theme = Theme::default();
        let lines = vec!["Unlock the device screen".to_string()];
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        NoticeDialog::new(" Device offline ", &lines, &theme).render(area, &mut buf);
        let text = screen(&buf, area);
        assert!(text.contains("Device offline"));
        assert!(text.contains("Unlock the device screen"));
        assert!(text.contains("[ OK ]"));
    }
}
