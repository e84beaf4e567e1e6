//! Full-screen text viewer

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use super::Theme;
use super::listing::truncate_path_left;

const FOOTER_HELP: &str = " ↑↓ PgUp/PgDn Home/End scroll   Esc/q/F3 close ";

/// Scrollable view of a text preview with line numbers
pub struct TextViewer<'a> {
    path: &'a str,
    lines: &'a [String],
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> TextViewer<'a> {
    pub fn new(path: &'a str, lines: &'a [String], scroll: usize, theme: &'a Theme) -> Self {
        Self { path, lines, scroll, theme }
    }

    /// Calculate the visible height (content area, excluding header and footer)
    pub fn content_height(area: Rect) -> usize {
        area.height.saturating_sub(2) as usize // -1 header, -1 footer
    }
}

impl Widget for TextViewer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let header_style = Style::default().bg(self.theme.viewer_header_bg).fg(self.theme.viewer_header_fg);
        let content_style = Style::default().bg(self.theme.viewer_content_bg).fg(self.theme.viewer_content_fg);
        let line_num_style = Style::default().bg(self.theme.viewer_content_bg).fg(self.theme.viewer_line_number);

        let content_height = Self::content_height(area);
        let total = self.lines.len();

        // Header: path on the left, position on the right
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_char(' ').set_style(header_style);
        }
        let position = if total == 0 {
            " [TEXT] empty ".to_string()
        } else {
            let last = (self.scroll + content_height).min(total);
            format!(" [TEXT] {}-{}/{} ", self.scroll + 1, last, total)
        };
        let path_width = (area.width as usize).saturating_sub(position.chars().count() + 2);
        buf.set_string(area.x, area.y, format!(" {}", truncate_path_left(self.path, path_width)), header_style);
        let pos_x = area.x + area.width.saturating_sub(position.chars().count() as u16);
        buf.set_string(pos_x, area.y, &position, header_style);

        // Content area
        let content_start_y = area.y + 1;
        for y in content_start_y..content_start_y + content_height as u16 {
            for x in area.x..area.x + area.width {
                buf[(x, y)].set_char(' ').set_style(content_style);
            }
        }

        let line_num_width = if total > 0 {
            ((total as f64).log10().floor() as usize + 1).max(4)
        } else {
            0
        };
        let text_start = area.x + line_num_width as u16 + 1;
        let text_width = (area.width as usize).saturating_sub(line_num_width + 1);

        for (i, line) in self.lines.iter().skip(self.scroll).take(content_height).enumerate() {
            let y = content_start_y + i as u16;
            let num_str = format!("{:>width$} ", self.scroll + i + 1, width = line_num_width);
            buf.set_string(area.x, y, &num_str, line_num_style);

            for (col, ch) in line.chars().take(text_width).enumerate() {
                // Control characters are not rendered properly by terminals
                let display_char = if ch.is_control() { ' ' } else { ch };
                buf[(text_start + col as u16, y)].set_char(display_char).set_style(content_style);
            }
        }

        // Footer
        let footer_y = area.y + area.height - 1;
        for x in area.x..area.x + area.width {
            buf[(x, footer_y)].set_char(' ').set_style(header_style);
        }
        buf.set_string(area.x, footer_y, FOOTER_HELP, header_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn test_viewer_renders_scrolled_lines() {
        let theme = Theme::default();
        let lines: Vec<String> = (1..=20).map(|i| format!("line {}", i)).collect();
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        TextViewer::new("/sdcard/log.txt", &lines, 5, &theme).render(area, &mut buf);

        assert!(row(&buf, 0, 40).contains("6-9/20"));
        assert!(row(&buf, 1, 40).contains("   6 line 6"));
        assert!(row(&buf, 4, 40).contains("line 9"));
        assert_eq!(TextViewer::content_height(area), 4);
    }
}
