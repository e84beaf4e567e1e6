//! Color themes
//!
//! Built-in presets (dark, classic, light) plus per-color overrides from
//! `[display.colors]`.

use std::collections::HashMap;

use ratatui::style::Color;

use crate::config::DisplayConfig;

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Listing and preview pane
    pub panel_border_active: Color,
    pub panel_border_inactive: Color,
    pub panel_header: Color,
    pub panel_background: Color,
    pub preview_text: Color,
    pub preview_message: Color,

    // File list colors
    pub file_normal: Color,
    pub file_directory: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,

    // Header and status bar
    pub header_bg: Color,
    pub header_fg: Color,
    pub device_connected: Color,
    pub device_problem: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub spinner: Color,

    // Console
    pub console_bg: Color,
    pub console_fg: Color,

    // Function key bar
    pub fkey_number: Color,
    pub fkey_label_bg: Color,
    pub fkey_label_fg: Color,

    // Viewer
    pub viewer_header_bg: Color,
    pub viewer_header_fg: Color,
    pub viewer_content_bg: Color,
    pub viewer_content_fg: Color,
    pub viewer_line_number: Color,

    // Dialogs
    pub dialog_bg: Color,
    pub dialog_border: Color,
    pub dialog_notice_bg: Color,
    pub dialog_notice_border: Color,
    pub dialog_title: Color,
    pub dialog_text: Color,
    pub dialog_input_focused_bg: Color,
    pub dialog_input_focused_fg: Color,
    pub dialog_input_selected_bg: Color,  // When text is selected (brighter)
    pub dialog_input_selected_fg: Color,
    pub dialog_input_unfocused_fg: Color,
    pub dialog_button_focused_bg: Color,
    pub dialog_button_focused_fg: Color,
    pub dialog_button_unfocused: Color,
    pub dialog_help: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        let teal = Color::Rgb(0, 150, 136);
        let gold = Color::Rgb(200, 170, 100);
        let light_gray = Color::Rgb(171, 178, 191);
        let dark_gray = Color::Rgb(76, 82, 99);
        let charcoal = Color::Rgb(58, 58, 58);

        Self {
            panel_border_active: teal,
            panel_border_inactive: Color::Rgb(160, 160, 160),
            panel_header: gold,
            panel_background: charcoal,
            preview_text: light_gray,
            preview_message: gold,

            file_normal: Color::Rgb(220, 220, 220),
            file_directory: Color::Rgb(171, 175, 135),
            cursor_bg: Color::Rgb(0, 95, 95),
            cursor_fg: Color::Rgb(220, 220, 220),

            header_bg: Color::Rgb(45, 45, 45),
            header_fg: light_gray,
            device_connected: Color::Rgb(152, 195, 121),
            device_problem: Color::Rgb(224, 108, 117),
            status_bg: Color::Rgb(45, 45, 45),
            status_fg: light_gray,
            spinner: gold,

            console_bg: Color::Rgb(30, 30, 30),
            console_fg: light_gray,

            fkey_number: Color::White,
            fkey_label_bg: Color::Rgb(95, 135, 135),
            fkey_label_fg: Color::Black,

            viewer_header_bg: teal,
            viewer_header_fg: Color::Black,
            viewer_content_bg: charcoal,
            viewer_content_fg: light_gray,
            viewer_line_number: dark_gray,

            dialog_bg: Color::Rgb(30, 40, 55),
            dialog_border: Color::Rgb(97, 175, 239),
            dialog_notice_bg: Color::Rgb(60, 40, 25),
            dialog_notice_border: Color::Rgb(210, 140, 60),
            dialog_title: Color::White,
            dialog_text: light_gray,
            dialog_input_focused_bg: dark_gray,
            dialog_input_focused_fg: Color::White,
            dialog_input_selected_bg: Color::Rgb(0, 100, 150),
            dialog_input_selected_fg: Color::White,
            dialog_input_unfocused_fg: dark_gray,
            dialog_button_focused_bg: teal,
            dialog_button_focused_fg: Color::Black,
            dialog_button_unfocused: dark_gray,
            dialog_help: dark_gray,
        }
    }

    /// White on blue, the classic two-pane look
    pub fn classic() -> Self {
        Self {
            panel_border_active: Color::LightCyan,
            panel_border_inactive: Color::Cyan,
            panel_header: Color::Yellow,
            panel_background: Color::Blue,
            preview_text: Color::LightCyan,
            preview_message: Color::Yellow,

            file_normal: Color::LightCyan,
            file_directory: Color::White,
            cursor_bg: Color::Cyan,
            cursor_fg: Color::Black,

            header_bg: Color::Cyan,
            header_fg: Color::Black,
            device_connected: Color::Black,
            device_problem: Color::Red,
            status_bg: Color::Cyan,
            status_fg: Color::Black,
            spinner: Color::Black,

            console_bg: Color::Black,
            console_fg: Color::Gray,

            fkey_number: Color::White,
            fkey_label_bg: Color::Cyan,
            fkey_label_fg: Color::Black,

            viewer_header_bg: Color::Cyan,
            viewer_header_fg: Color::Black,
            viewer_content_bg: Color::Blue,
            viewer_content_fg: Color::LightCyan,
            viewer_line_number: Color::Cyan,

            dialog_bg: Color::Gray,
            dialog_border: Color::Black,
            dialog_notice_bg: Color::Red,
            dialog_notice_border: Color::White,
            dialog_title: Color::Black,
            dialog_text: Color::Black,
            dialog_input_focused_bg: Color::Cyan,
            dialog_input_focused_fg: Color::Black,
            dialog_input_selected_bg: Color::LightCyan,
            dialog_input_selected_fg: Color::Black,
            dialog_input_unfocused_fg: Color::DarkGray,
            dialog_button_focused_bg: Color::Cyan,
            dialog_button_focused_fg: Color::Black,
            dialog_button_unfocused: Color::Black,
            dialog_help: Color::DarkGray,
        }
    }

    /// For light terminal backgrounds
    pub fn light() -> Self {
        Self {
            panel_border_active: Color::Blue,
            panel_border_inactive: Color::DarkGray,
            panel_header: Color::Blue,
            panel_background: Color::White,
            preview_text: Color::Black,
            preview_message: Color::Rgb(180, 100, 0),

            file_normal: Color::Black,
            file_directory: Color::Blue,
            cursor_bg: Color::Blue,
            cursor_fg: Color::White,

            header_bg: Color::Gray,
            header_fg: Color::Black,
            device_connected: Color::Rgb(0, 120, 0),
            device_problem: Color::Red,
            status_bg: Color::Gray,
            status_fg: Color::Black,
            spinner: Color::Blue,

            console_bg: Color::Rgb(240, 240, 240),
            console_fg: Color::Black,

            fkey_number: Color::Black,
            fkey_label_bg: Color::Blue,
            fkey_label_fg: Color::White,

            viewer_header_bg: Color::Blue,
            viewer_header_fg: Color::White,
            viewer_content_bg: Color::White,
            viewer_content_fg: Color::Black,
            viewer_line_number: Color::Gray,

            dialog_bg: Color::Rgb(220, 220, 255),
            dialog_border: Color::Blue,
            dialog_notice_bg: Color::Rgb(255, 235, 200),
            dialog_notice_border: Color::Rgb(200, 120, 40),
            dialog_title: Color::Black,
            dialog_text: Color::Black,
            dialog_input_focused_bg: Color::White,
            dialog_input_focused_fg: Color::Black,
            dialog_input_selected_bg: Color::Rgb(180, 210, 255),
            dialog_input_selected_fg: Color::Black,
            dialog_input_unfocused_fg: Color::Gray,
            dialog_button_focused_bg: Color::Blue,
            dialog_button_focused_fg: Color::White,
            dialog_button_unfocused: Color::DarkGray,
            dialog_help: Color::Gray,
        }
    }

    /// Get a theme by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "classic" => Some(Self::classic()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Preset named in the config with its overrides applied
    pub fn from_config(display: &DisplayConfig) -> Self {
        let preset = Self::by_name(&display.theme).unwrap_or_else(|| {
            log::warn!("Unknown theme {:?}, using dark", display.theme);
            Self::dark()
        });
        preset.with_overrides(&display.colors)
    }

    /// Apply custom color overrides from config
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        for (key, value) in overrides {
            let Some(color) = parse_color(value) else {
                log::warn!("Invalid color {:?} for {}", value, key);
                continue;
            };
            let slot = match key.as_str() {
                "panel_border_active" => &mut self.panel_border_active,
                "panel_border_inactive" => &mut self.panel_border_inactive,
                "panel_header" => &mut self.panel_header,
                "panel_background" => &mut self.panel_background,
                "preview_text" => &mut self.preview_text,
                "preview_message" => &mut self.preview_message,
                "file_normal" => &mut self.file_normal,
                "file_directory" => &mut self.file_directory,
                "cursor_bg" => &mut self.cursor_bg,
                "cursor_fg" => &mut self.cursor_fg,
                "header_bg" => &mut self.header_bg,
                "header_fg" => &mut self.header_fg,
                "device_connected" => &mut self.device_connected,
                "device_problem" => &mut self.device_problem,
                "status_bg" => &mut self.status_bg,
                "status_fg" => &mut self.status_fg,
                "spinner" => &mut self.spinner,
                "console_bg" => &mut self.console_bg,
                "console_fg" => &mut self.console_fg,
                "viewer_content_bg" => &mut self.viewer_content_bg,
                "viewer_content_fg" => &mut self.viewer_content_fg,
                "dialog_bg" => &mut self.dialog_bg,
                "dialog_border" => &mut self.dialog_border,
                "dialog_text" => &mut self.dialog_text,
                _ => {
                    log::warn!("Unknown theme color {:?}", key);
                    continue;
                }
            };
            *slot = color;
        }
        self
    }
}

/// Parse a color string into a ratatui Color
///
/// Supports:
/// - Named colors: "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white", "gray"
/// - Light variants: "light_red", "light_green", etc.
/// - RGB hex: "#RRGGBB" or "RRGGBB"
/// - RGB decimal: "rgb(R,G,B)"
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "black" => return Some(Color::Black),
        "red" => return Some(Color::Red),
        "green" => return Some(Color::Green),
        "yellow" => return Some(Color::Yellow),
        "blue" => return Some(Color::Blue),
        "magenta" => return Some(Color::Magenta),
        "cyan" => return Some(Color::Cyan),
        "white" => return Some(Color::White),
        "gray" | "grey" => return Some(Color::Gray),
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => return Some(Color::DarkGray),
        "light_red" | "lightred" => return Some(Color::LightRed),
        "light_green" | "lightgreen" => return Some(Color::LightGreen),
        "light_yellow" | "lightyellow" => return Some(Color::LightYellow),
        "light_blue" | "lightblue" => return Some(Color::LightBlue),
        "light_magenta" | "lightmagenta" => return Some(Color::LightMagenta),
        "light_cyan" | "lightcyan" => return Some(Color::LightCyan),
        "reset" => return Some(Color::Reset),
        _ => {}
    }

    let hex = s.strip_prefix('#').unwrap_or(&s);
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    if let Some(inner) = s.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() == 3 {
            let r = parts[0].trim().parse().ok()?;
            let g = parts[1].trim().parse().ok()?;
            let b = parts[2].trim().parse().ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colors() {
        assert_eq!(parse_color("BLUE"), Some(Color::Blue));
        assert_eq!(parse_color("light_cyan"), Some(Color::LightCyan));
        assert_eq!(parse_color("#1a2b3c"), Some(Color::Rgb(26, 43, 60)));
        assert_eq!(parse_color("rgb(0, 128, 255)"), Some(Color::Rgb(0, 128, 255)));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("rgb(1,2)"), None);
    }

    #[test]
    fn test_theme_presets() {
        assert!(Theme::by_name("Dark").is_some());
        assert!(Theme::by_name("classic").is_some());
        assert!(Theme::by_name("light").is_some());
        assert!(Theme::by_name("solarized").is_none());
    }

    #[test]
    fn test_from_config_applies_overrides() {
        let mut display = DisplayConfig::default();
        display.theme = "nope".to_string();
        display.colors.insert("cursor_bg".to_string(), "#ff0000".to_string());
        display.colors.insert("not_a_color".to_string(), "red".to_string());
        display.colors.insert("file_normal".to_string(), "sparkly".to_string());

        let theme = Theme::from_config(&display);
        assert_eq!(theme.cursor_bg, Color::Rgb(255, 0, 0));
        assert_eq!(theme.file_normal, Theme::dark().file_normal);
    }
}
