//! Cursor and scroll state for the remote file list.
//!
//! Entries belong to the navigator; this only tracks where the user is in them.

use crate::adb::RemoteEntry;

#[derive(Debug, Clone, Default)]
pub struct ListingCursor {
    /// Index of the highlighted entry
    pub cursor: usize,
    /// Index of the first visible entry
    pub scroll_offset: usize,
    /// Rows available for entries (updated during rendering)
    pub visible_height: usize,
    /// Number of entries in the listing
    count: usize,
}

impl ListingCursor {
    /// Reset for a freshly loaded listing
    pub fn reset(&mut self, count: usize) {
        self.count = count;
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Reset and put the cursor on the entry called `name`, if present
    pub fn reset_on(&mut self, entries: &[RemoteEntry], name: &str) {
        self.reset(entries.len());
        if let Some(idx) = entries.iter().position(|e| e.name == name) {
            self.cursor = idx;
            self.adjust_scroll();
        }
    }

    pub fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height;
        self.adjust_scroll();
    }

    pub fn selected<'a>(&self, entries: &'a [RemoteEntry]) -> Option<&'a RemoteEntry> {
        entries.get(self.cursor)
    }

    fn adjust_scroll(&mut self) {
        let visible = self.visible_height;
        if visible == 0 {
            return;
        }

        // If cursor is before visible area, scroll up
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        }
        // If cursor is after visible area, scroll down
        else if self.cursor >= self.scroll_offset + visible {
            self.scroll_offset = self.cursor - visible + 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.count {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    pub fn page_up(&mut self) {
        let page_size = self.visible_height.max(1);
        self.cursor = self.cursor.saturating_sub(page_size);
        self.adjust_scroll();
    }

    pub fn page_down(&mut self) {
        let page_size = self.visible_height.max(1);
        self.cursor = (self.cursor + page_size).min(self.count.saturating_sub(1));
        self.adjust_scroll();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    pub fn move_end(&mut self) {
        if self.count > 0 {
            self.cursor = self.count - 1;
        }
        self.adjust_scroll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(count: usize, height: usize) -> ListingCursor {
        let mut c = ListingCursor::default();
        c.reset(count);
        c.set_visible_height(height);
        c
    }

    #[test]
    fn test_move_down_scrolls() {
        let mut c = cursor(10, 3);
        for _ in 0..4 {
            c.move_down();
        }
        assert_eq!(c.cursor, 4);
        assert_eq!(c.scroll_offset, 2);
    }

    #[test]
    fn test_bounds() {
        let mut c = cursor(2, 5);
        c.move_up();
        assert_eq!(c.cursor, 0);
        c.move_down();
        c.move_down();
        assert_eq!(c.cursor, 1);
        c.page_down();
        assert_eq!(c.cursor, 1);

        let mut empty = cursor(0, 5);
        empty.move_end();
        empty.page_down();
        assert_eq!(empty.cursor, 0);
        assert!(empty.selected(&[]).is_none());
    }

    #[test]
    fn test_reset_on_name() {
        let entries = vec![RemoteEntry::parent(), RemoteEntry::new("Alarms", true), RemoteEntry::new("DCIM", true)];
        let mut c = cursor(0, 2);
        c.reset_on(&entries, "DCIM");
        assert_eq!(c.cursor, 2);
        assert_eq!(c.scroll_offset, 1);
        assert_eq!(c.selected(&entries).map(|e| e.name.as_str()), Some("DCIM"));

        c.reset_on(&entries, "missing");
        assert_eq!(c.cursor, 0);
    }
}
