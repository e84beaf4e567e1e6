//! UI-related state that changes during rendering.

/// State related to terminal dimensions and UI layout.
///
/// These values are updated during rendering to reflect the current
/// terminal size and layout configuration.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Visible height for the full-screen viewer (updated during rendering)
    pub viewer_height: usize,
    /// Terminal height (updated during rendering)
    pub terminal_height: u16,
    /// Height of the console log area
    pub console_height: u16,
    /// Left (listing) pane width as percentage (20-80)
    pub listing_percent: u16,
    /// Whether the current text input field has its content selected
    /// (typing will replace all content). Set on Tab into a field with content.
    pub input_selected: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            viewer_height: 0,
            terminal_height: 24,
            console_height: 6,
            listing_percent: 45,
            input_selected: false,
        }
    }
}

impl UiState {
    pub fn from_config(console_height: u16) -> Self {
        Self {
            console_height: console_height.max(1),
            ..Default::default()
        }
    }

    /// Grow the console by one line
    pub fn grow_console(&mut self) {
        // Leave room for header, listing and status rows
        let max_height = self.terminal_height.saturating_sub(10);
        if self.console_height < max_height {
            self.console_height += 1;
        }
    }

    /// Shrink the console by one line
    pub fn shrink_console(&mut self) {
        if self.console_height > 1 {
            self.console_height -= 1;
        }
    }

    /// Widen the listing (shrink the preview pane)
    pub fn grow_listing(&mut self) {
        if self.listing_percent < 80 {
            self.listing_percent += 5;
        }
    }

    /// Narrow the listing (grow the preview pane)
    pub fn shrink_listing(&mut self) {
        if self.listing_percent > 20 {
            self.listing_percent -= 5;
        }
    }
}
