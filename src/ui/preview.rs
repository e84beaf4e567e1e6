//! Preview pane widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::adb::path;
use crate::state::pane::PreviewPane;
use super::Theme;

pub struct PreviewWidget<'a> {
    pane: &'a PreviewPane,
    theme: &'a Theme,
}

impl<'a> PreviewWidget<'a> {
    pub fn new(pane: &'a PreviewPane, theme: &'a Theme) -> Self {
        Self { pane, theme }
    }

    fn title(&self) -> String {
        match self.pane.remote() {
            Some(remote) => format!(" Preview: {} ", path::basename(remote)),
            None => " Preview ".to_string(),
        }
    }
}

impl Widget for PreviewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg = Style::default().bg(self.theme.panel_background);
        let block = Block::default()
            .title(Line::from(Span::styled(
                self.title(),
                Style::default().fg(self.theme.panel_header).add_modifier(Modifier::BOLD),
            )))
            .borders(Borders::ALL)
            .border_style(bg.fg(self.theme.panel_border_inactive))
            .style(bg);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        match self.pane {
            // Text is drawn as-is, one row per line
            PreviewPane::Text { text, .. } => {
                let style = bg.fg(self.theme.preview_text);
                for (i, line) in text.lines().take(inner.height as usize).enumerate() {
                    let shown: String = line
                        .chars()
                        .map(|c| if c.is_control() { ' ' } else { c })
                        .take(inner.width as usize)
                        .collect();
                    buf.set_string(inner.x, inner.y + i as u16, &shown, style);
                }
            }
            _ => {
                let lines: Vec<Line> = self.pane.message().into_iter().map(Line::from).collect();
                Paragraph::new(lines)
                    .style(bg.fg(self.theme.preview_message))
                    .wrap(Wrap { trim: false })
                    .render(inner, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(buf: &Buffer, area: Rect) -> String {
        (area.y..area.y + area.height)
            .map(|y| (area.x..area.x + area.width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_text_preview_rendering() {
        let theme = Theme::default();
        let pane = PreviewPane::Text { remote: "/sdcard/a.txt".to_string(), text: "hello\tworld\nsecond".to_string() };
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&pane, &theme).render(area, &mut buf);

        let text = screen(&buf, area);
        assert!(text.contains("Preview: a.txt"));
        assert!(text.contains("hello world"));
        assert!(text.contains("second"));
    }

    #[test]
    fn test_failure_message_rendering() {
        let theme = Theme::default();
        let pane = PreviewPane::Failed { remote: "/data/x".to_string(), error: "denied".to_string() };
        let area = Rect::new(0, 0, 40, 7);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&pane, &theme).render(area, &mut buf);
        let text = screen(&buf, area);
        assert!(text.contains("Failed to load preview."));
        assert!(text.contains("denied"));
    }
}
