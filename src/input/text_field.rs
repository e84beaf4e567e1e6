//! Single-line text editing for dialog fields.
//!
//! Cursors count chars, not bytes, so paths with non-ASCII names edit cleanly.

pub struct TextField;

/// Byte offset of char index `idx` (or the end of the string)
fn byte_index(input: &str, idx: usize) -> usize {
    input.char_indices().nth(idx).map_or(input.len(), |(i, _)| i)
}

impl TextField {
    /// Delete the char before the cursor
    pub fn backspace(input: &mut String, cursor: &mut usize) {
        if *cursor > 0 && *cursor <= input.chars().count() {
            input.remove(byte_index(input, *cursor - 1));
            *cursor -= 1;
        }
    }

    /// Delete the char under the cursor
    pub fn delete(input: &mut String, cursor: usize) {
        if cursor < input.chars().count() {
            input.remove(byte_index(input, cursor));
        }
    }

    pub fn left(cursor: &mut usize) {
        *cursor = cursor.saturating_sub(1);
    }

    pub fn right(input: &str, cursor: &mut usize) {
        if *cursor < input.chars().count() {
            *cursor += 1;
        }
    }

    pub fn home(cursor: &mut usize) {
        *cursor = 0;
    }

    pub fn end(input: &str, cursor: &mut usize) {
        *cursor = input.chars().count();
    }

    pub fn insert_char(input: &mut String, cursor: &mut usize, c: char) {
        let at = byte_index(input, *cursor);
        input.insert(at, c);
        *cursor += 1;
    }

    /// Insert pasted text; line breaks are dropped
    pub fn insert_str(input: &mut String, cursor: &mut usize, text: &str) {
        let clean: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        let at = byte_index(input, *cursor);
        input.insert_str(at, &clean);
        *cursor += clean.chars().count();
    }

    /// Ctrl+W: delete the word before the cursor, stopping after a `/`
    pub fn delete_word(input: &mut String, cursor: &mut usize) {
        let chars: Vec<char> = input.chars().collect();
        let end = (*cursor).min(chars.len());
        let mut start = end;
        while start > 0 && chars[start - 1] == '/' {
            start -= 1;
        }
        while start > 0 && chars[start - 1] != '/' {
            start -= 1;
        }
        let from = byte_index(input, start);
        let to = byte_index(input, end);
        input.replace_range(from..to, "");
        *cursor = start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backspace() {
        let mut input = "hello".to_string();
        let mut cursor = 3;
        TextField::backspace(&mut input, &mut cursor);
        assert_eq!(input, "helo");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_backspace_at_start() {
        let mut input = "hello".to_string();
        let mut cursor = 0;
        TextField::backspace(&mut input, &mut cursor);
        assert_eq!(input, "hello");
        assert_eq!(cursor, 0);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = "Müsic".to_string();
        let mut cursor = 2;
        TextField::backspace(&mut input, &mut cursor);
        assert_eq!(input, "Msic");
        TextField::insert_char(&mut input, &mut cursor, 'ü');
        assert_eq!(input, "Müsic");
        assert_eq!(cursor, 2);
        TextField::delete(&mut input, 1);
        assert_eq!(input, "Msic");
        TextField::end(&input, &mut cursor);
        assert_eq!(cursor, 4);
        TextField::right(&input, &mut cursor);
        assert_eq!(cursor, 4);
    }

    #[test]
    fn test_insert_pasted_text() {
        let mut input = "/sdcard/".to_string();
        let mut cursor = 8;
        TextField::insert_str(&mut input, &mut cursor, "Dównload\n");
        assert_eq!(input, "/sdcard/Dównload");
        assert_eq!(cursor, 16);
    }

    #[test]
    fn test_delete_word_stops_at_slash() {
        let mut input = "/sdcard/DCIM/Camera".to_string();
        let mut cursor = input.chars().count();
        TextField::delete_word(&mut input, &mut cursor);
        assert_eq!(input, "/sdcard/DCIM/");
        TextField::delete_word(&mut input, &mut cursor);
        assert_eq!(input, "/sdcard/");
        assert_eq!(cursor, 8);
    }
}
