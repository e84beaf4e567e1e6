//! Console log area below the status bar

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use super::Theme;

/// Shows the most recent console lines, bottom-aligned
pub struct ConsoleArea<'a> {
    lines: &'a [String],
    theme: &'a Theme,
}

impl<'a> ConsoleArea<'a> {
    pub fn new(lines: &'a [String], theme: &'a Theme) -> Self {
        Self { lines, theme }
    }
}

impl Widget for ConsoleArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let style = Style::default().bg(self.theme.console_bg).fg(self.theme.console_fg);

        // Clear the entire area
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                buf[(x, y)].set_char(' ').set_style(style);
            }
        }

        let height = area.height as usize;
        let width = area.width as usize;
        let visible = self.lines.len().min(height);
        let start = self.lines.len() - visible;
        let first_y = area.y + (height - visible) as u16;

        for (i, line) in self.lines[start..].iter().enumerate() {
            // Subprocess output may carry tabs and carriage returns
            let clean: String = line
                .chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .take(width)
                .collect();
            buf.set_string(area.x, first_y + i as u16, &clean, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn test_shows_latest_lines_bottom_aligned() {
        let theme = Theme::default();
        let lines: Vec<String> = (1..=5).map(|i| format!("line {}", i)).collect();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        ConsoleArea::new(&lines, &theme).render(area, &mut buf);
        assert!(row(&buf, 0, 20).starts_with("line 3"));
        assert!(row(&buf, 2, 20).starts_with("line 5"));
    }

    #[test]
    fn test_few_lines_sit_at_bottom() {
        let theme = Theme::default();
        let lines = vec!["only\tone".to_string()];
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        ConsoleArea::new(&lines, &theme).render(area, &mut buf);
        assert!(row(&buf, 0, 20).trim().is_empty());
        assert!(row(&buf, 2, 20).starts_with("only one"));
    }
}
