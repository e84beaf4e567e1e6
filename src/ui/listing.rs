//! Remote file listing widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, StatefulWidget, Widget},
};

use crate::adb::RemoteEntry;
use crate::state::listing::ListingCursor;
use super::Theme;

/// Height of the footer area (separator line + footer text line)
const FOOTER_HEIGHT: u16 = 2;

/// Single-column listing of the current remote directory
pub struct ListingWidget<'a> {
    path: &'a str,
    entries: &'a [RemoteEntry],
    is_active: bool,
    /// Directory being loaded, shown in the footer
    pending: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> ListingWidget<'a> {
    pub fn new(path: &'a str, entries: &'a [RemoteEntry], is_active: bool, theme: &'a Theme) -> Self {
        Self { path, entries, is_active, pending: None, theme }
    }

    pub fn with_pending(mut self, pending: Option<&'a str>) -> Self {
        self.pending = pending;
        self
    }

    fn footer_left(&self) -> String {
        if let Some(path) = self.pending {
            return format!(" Loading {}... ", path);
        }
        let dirs = self.entries.iter().filter(|e| e.is_dir && !e.is_parent()).count();
        let files = self.entries.iter().filter(|e| !e.is_dir).count();
        format!(" {} dirs, {} files ", dirs, files)
    }

    fn render_entries(&self, cursor: &ListingCursor, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 4 {
            return;
        }

        let rows = area.height as usize;
        let start = cursor.scroll_offset;
        let end = (start + rows).min(self.entries.len());
        let width = area.width as usize;

        for (i, idx) in (start..end).enumerate() {
            let entry = &self.entries[idx];
            let style = entry_style(entry, idx == cursor.cursor, self.is_active, self.theme);
            let name = truncate_name(&entry.display_name(), width.saturating_sub(1));
            let span = Span::styled(format!(" {:<width$}", name, width = width.saturating_sub(1)), style);
            buf.set_span(area.x, area.y + i as u16, &span, area.width);
        }
    }
}

impl StatefulWidget for ListingWidget<'_> {
    type State = ListingCursor;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let panel_bg = self.theme.panel_background;
        let border_color = if self.is_active {
            self.theme.panel_border_active
        } else {
            self.theme.panel_border_inactive
        };
        let border_style = Style::default().fg(border_color).bg(panel_bg);

        let path_style = Style::default()
            .fg(Color::White)
            .bg(self.theme.cursor_bg)
            .add_modifier(Modifier::BOLD);
        let max_title = area.width.saturating_sub(4) as usize;
        let title_line = Line::from(vec![Span::styled(
            format!(" {} ", truncate_path_left(self.path, max_title.saturating_sub(2))),
            path_style,
        )]);

        let block = Block::default()
            .title(title_line)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(panel_bg));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height <= FOOTER_HEIGHT || inner.width == 0 {
            return;
        }

        let content_area = Rect {
            x: inner.x,
            y: inner.y,
            width: inner.width,
            height: inner.height - FOOTER_HEIGHT,
        };

        // Navigation keys page by what is actually visible
        state.set_visible_height(content_area.height as usize);
        self.render_entries(state, content_area, buf);

        let separator_y = inner.y + inner.height - FOOTER_HEIGHT;
        let footer_y = separator_y + 1;
        for x in inner.x..inner.x + inner.width {
            buf[(x, separator_y)].set_char('─').set_style(border_style);
        }

        let footer_style = Style::default().fg(self.theme.file_normal).bg(panel_bg);
        let footer = truncate_name(&self.footer_left(), inner.width as usize);
        buf.set_string(inner.x, footer_y, &footer, footer_style);
    }
}

/// Style for a listing row based on type and cursor
fn entry_style(entry: &RemoteEntry, is_cursor: bool, is_active: bool, theme: &Theme) -> Style {
    let mut style = if is_cursor && is_active {
        Style::default().bg(theme.cursor_bg).fg(theme.cursor_fg)
    } else if entry.is_dir {
        Style::default().fg(theme.file_directory)
    } else {
        Style::default().fg(theme.file_normal)
    };

    // Make directories bold
    if entry.is_dir {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

/// Truncate a name to fit within max_width (keeps the beginning)
pub fn truncate_name(name: &str, max_width: usize) -> String {
    if name.chars().count() <= max_width {
        name.to_string()
    } else if max_width <= 3 {
        name.chars().take(max_width).collect()
    } else {
        let mut result: String = name.chars().take(max_width - 1).collect();
        result.push('…');
        result
    }
}

/// Truncate a path to fit within max_width (keeps the end)
pub fn truncate_path_left(path: &str, max_width: usize) -> String {
    let char_count = path.chars().count();
    if char_count <= max_width {
        path.to_string()
    } else if max_width <= 1 {
        "…".to_string()
    } else {
        let skip = char_count - max_width + 1;
        let mut result = String::from("…");
        result.extend(path.chars().skip(skip));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncation_is_char_safe() {
        assert_eq!(truncate_name("Ünïcödé.txt", 5), "Ünïc…");
        assert_eq!(truncate_name("short", 10), "short");
        assert_eq!(truncate_path_left("/sdcard/Müsic/Album", 8), "…c/Album");
        assert_eq!(truncate_path_left("/", 8), "/");
    }

    #[test]
    fn test_render_updates_visible_height() {
        let theme = Theme::default();
        let entries = vec![RemoteEntry::parent(), RemoteEntry::new("DCIM", true), RemoteEntry::new("a.txt", false)];
        let mut cursor = ListingCursor::default();
        cursor.reset(entries.len());

        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        ListingWidget::new("/sdcard", &entries, true, &theme).render(area, &mut buf, &mut cursor);

        // 10 rows minus two borders and the footer
        assert_eq!(cursor.visible_height, 6);
        let row: String = (0..30).map(|x| buf[(x, 2)].symbol().to_string()).collect();
        assert!(row.contains("DCIM/"));
        let footer: String = (0..30).map(|x| buf[(x, 8)].symbol().to_string()).collect();
        assert!(footer.contains("1 dirs, 1 files"));
    }
}
