//! Header, status bar and function key bar widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::state::app::DeviceStatus;
use super::Theme;
use super::spinner::Spinner;

/// Top line: program name and device status
pub struct HeaderBar<'a> {
    status: &'a DeviceStatus,
    theme: &'a Theme,
}

impl<'a> HeaderBar<'a> {
    pub fn new(status: &'a DeviceStatus, theme: &'a Theme) -> Self {
        Self { status, theme }
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }
        let style = Style::default().bg(self.theme.header_bg).fg(self.theme.header_fg);
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_char(' ').set_style(style);
        }

        let name = " adbrowse ";
        buf.set_string(area.x, area.y, name, style.add_modifier(Modifier::BOLD));

        let device_color = if self.status.is_connected() {
            self.theme.device_connected
        } else {
            self.theme.device_problem
        };
        let text = format!("│ Device Status: {} ", self.status.describe());
        let max = (area.width as usize).saturating_sub(name.len());
        buf.set_string(area.x + name.len() as u16, area.y, truncate_str(&text, max), style.fg(device_color));
    }
}

/// Status bar: item count on the left, activity on the right
pub struct StatusBar<'a> {
    item_count: usize,
    busy: Option<&'a str>,
    spinner_frame: usize,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(item_count: usize, theme: &'a Theme) -> Self {
        Self { item_count, busy: None, spinner_frame: 0, theme }
    }

    pub fn with_activity(mut self, busy: Option<&'a str>, frame: usize) -> Self {
        self.busy = busy;
        self.spinner_frame = frame;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let style = Style::default().bg(self.theme.status_bg).fg(self.theme.status_fg);

        // Clear the line with background
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_char(' ').set_style(style);
        }

        let count = format!(" {} item(s) in current folder ", self.item_count);
        buf.set_string(area.x, area.y, truncate_str(&count, area.width as usize), style);

        let Some(label) = self.busy else {
            return;
        };
        let room = (area.width as usize).saturating_sub(count.chars().count() + 1);
        let spinner = Spinner::new(self.spinner_frame, label)
            .spinner_style(style.fg(self.theme.spinner).add_modifier(Modifier::BOLD))
            .message_style(style);
        let width = spinner.width().saturating_add(1).min(room as u16);
        let x = area.x + area.width.saturating_sub(width);
        spinner.render(Rect::new(x, area.y, width, 1), buf);
    }
}

/// Bottom line with the function key labels
pub struct FunctionKeyBar<'a> {
    theme: &'a Theme,
}

const FUNCTION_KEYS: &[(&str, &str)] = &[
    ("2", "Save"),
    ("3", "View"),
    ("5", "Refresh"),
    ("7", "Pull"),
    ("8", "Push"),
    ("10", "Quit"),
];

impl<'a> FunctionKeyBar<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for FunctionKeyBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width == 0 {
            return;
        }

        let num_style = Style::default().fg(self.theme.fkey_number).bg(self.theme.console_bg);
        let label_style = Style::default().fg(self.theme.fkey_label_fg).bg(self.theme.fkey_label_bg);
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_char(' ').set_style(num_style);
        }

        // Equal-width slots, number then label
        let slot = (area.width as usize / FUNCTION_KEYS.len()).max(4);
        let mut x = area.x;
        for (num, label) in FUNCTION_KEYS {
            if x >= area.x + area.width {
                break;
            }
            buf.set_string(x, area.y, num, num_style);
            let label_x = x + num.len() as u16;
            let label_width = slot.saturating_sub(num.len() + 1);
            let text = format!("{:<width$}", truncate_str(label, label_width), width = label_width);
            let max = (area.x + area.width).saturating_sub(label_x) as usize;
            buf.set_string(label_x, area.y, truncate_str(&text, max), label_style);
            x += slot as u16;
        }
    }
}

/// Truncate a string to max_width (keeps the start)
fn truncate_str(s: &str, max_width: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_width {
        s.to_string()
    } else if max_width <= 1 {
        "…".chars().take(max_width).collect()
    } else {
        let mut result: String = s.chars().take(max_width - 1).collect();
        result.push('…');
        result
    }
}
