//! Activity spinner shown in the status bar

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

/// Braille dots animation
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Animated indicator followed by a short message
pub struct Spinner<'a> {
    frame: usize,
    message: &'a str,
    spinner_style: Style,
    message_style: Style,
}

impl<'a> Spinner<'a> {
    pub fn new(frame: usize, message: &'a str) -> Self {
        Self {
            frame: frame % SPINNER_FRAMES.len(),
            message,
            spinner_style: Style::default(),
            message_style: Style::default(),
        }
    }

    pub fn spinner_style(mut self, style: Style) -> Self {
        self.spinner_style = style;
        self
    }

    pub fn message_style(mut self, style: Style) -> Self {
        self.message_style = style;
        self
    }

    /// Columns needed to draw spinner and message
    pub fn width(&self) -> u16 {
        (self.message.chars().count() + 2) as u16
    }
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 1 || area.height < 1 {
            return;
        }

        buf.set_string(area.x, area.y, SPINNER_FRAMES[self.frame], self.spinner_style);

        if area.width > 2 && !self.message.is_empty() {
            let room = (area.width - 2) as usize;
            let shown: String = self.message.chars().take(room).collect();
            buf.set_string(area.x + 2, area.y, &shown, self.message_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_wraps() {
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        Spinner::new(SPINNER_FRAMES.len() + 1, "Loading").render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), SPINNER_FRAMES[1]);
        assert_eq!(buf[(2, 0)].symbol(), "L");
    }

    #[test]
    fn test_message_clipped_to_area() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        let spinner = Spinner::new(0, "Transferring");
        assert_eq!(spinner.width(), 14);
        spinner.render(area, &mut buf);
        let row: String = (0..5).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(row, format!("{} Tra", SPINNER_FRAMES[0]));
    }
}
