//! Document content: a rope of chars where only `\n` separates lines.

use std::fmt;

use anyhow::Result;
use ropey::iter::Chars;
use ropey::Rope;

/// The line separator. No other character starts a new line.
pub const LINE_SEPARATOR: char = '\n';

/// Plain-text document content.
///
/// Cloning is cheap: the rope shares its nodes, so editing a clone leaves the
/// original untouched. Offsets count chars (Unicode scalar values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    rope: Rope,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rope)
    }
}

impl Document {
    /// Creates an empty document (one empty line).
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Returns the underlying rope (read-only).
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Returns the total number of chars, counting each `\n` as one.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the number of lines. Always at least 1.
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Returns true if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns the text of a line (0-indexed), including its trailing `\n` if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the line index is out of bounds.
    pub fn line(&self, line_idx: usize) -> Result<ropey::RopeSlice<'_>> {
        if line_idx >= self.rope.len_lines() {
            anyhow::bail!(
                "line index {} out of bounds (document has {} lines)",
                line_idx,
                self.rope.len_lines()
            );
        }
        Ok(self.rope.line(line_idx))
    }

    /// Returns the char offset of the start of a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line index is out of bounds.
    pub fn line_to_char(&self, line_idx: usize) -> Result<usize> {
        if line_idx >= self.rope.len_lines() {
            anyhow::bail!(
                "line index {} out of bounds (document has {} lines)",
                line_idx,
                self.rope.len_lines()
            );
        }
        Ok(self.rope.line_to_char(line_idx))
    }

    /// Returns the line containing a char offset. `len_chars()` itself is allowed
    /// and maps to the last line.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is past the end.
    pub fn char_to_line(&self, char_idx: usize) -> Result<usize> {
        if char_idx > self.rope.len_chars() {
            anyhow::bail!(
                "char index {} out of bounds (document has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        Ok(self.rope.char_to_line(char_idx))
    }

    /// Returns the char at an offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is out of bounds.
    pub fn char_at(&self, char_idx: usize) -> Result<char> {
        if char_idx >= self.rope.len_chars() {
            anyhow::bail!(
                "char index {} out of bounds (document has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        Ok(self.rope.char(char_idx))
    }

    /// Returns the length of a line in chars, excluding the trailing `\n`.
    ///
    /// # Errors
    ///
    /// Returns an error if the line index is out of bounds.
    pub fn line_len_chars(&self, line_idx: usize) -> Result<usize> {
        let line = self.line(line_idx)?;
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == LINE_SEPARATOR {
            return Ok(len - 1);
        }
        Ok(len)
    }

    /// Returns a slice of text in the char range `[start..end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds.
    pub fn slice(&self, start: usize, end: usize) -> Result<ropey::RopeSlice<'_>> {
        self.check_range(start, end)?;
        Ok(self.rope.slice(start..end))
    }

    /// Returns an iterator over the chars following `char_idx`, in reading order.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is past the end.
    pub fn chars_after(&self, char_idx: usize) -> Result<Chars<'_>> {
        if char_idx > self.rope.len_chars() {
            anyhow::bail!(
                "char index {} out of bounds (document has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        Ok(self.rope.chars_at(char_idx))
    }

    /// Returns an iterator over the chars preceding `char_idx`, nearest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is past the end.
    pub fn chars_before(&self, char_idx: usize) -> Result<impl Iterator<Item = char> + '_> {
        let mut chars = self.chars_after(char_idx)?;
        Ok(std::iter::from_fn(move || chars.prev()))
    }

    /// Inserts text at the given char offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is out of bounds.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> Result<()> {
        if char_idx > self.rope.len_chars() {
            anyhow::bail!(
                "insert position {} out of bounds (document has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        self.rope.insert(char_idx, text);
        Ok(())
    }

    /// Removes the char range `[start..end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds.
    pub fn remove(&mut self, start: usize, end: usize) -> Result<()> {
        self.check_range(start, end)?;
        self.rope.remove(start..end);
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end {
            anyhow::bail!("invalid range: start ({}) > end ({})", start, end);
        }
        if end > self.rope.len_chars() {
            anyhow::bail!(
                "range end {} out of bounds (document has {} chars)",
                end,
                self.rope.len_chars()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_empty() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len_chars(), 0);
        assert_eq!(doc.len_lines(), 1);
        assert_eq!(doc.line_len_chars(0).unwrap(), 0);
    }

    #[test]
    fn test_from_str() {
        let doc = Document::from("hello\nworld");
        assert_eq!(doc.len_chars(), 11);
        assert_eq!(doc.len_lines(), 2);
        assert_eq!(doc.to_string(), "hello\nworld");
    }

    #[test]
    fn test_trailing_newline_opens_empty_line() {
        let doc = Document::from("hi\n");
        assert_eq!(doc.len_lines(), 2);
        assert_eq!(doc.line_len_chars(1).unwrap(), 0);
        assert_eq!(doc.line_to_char(1).unwrap(), 3);
    }

    // ── Line separators ──────────────────────────────────────────────

    #[test]
    fn test_carriage_return_is_not_a_separator() {
        let doc = Document::from("a\rb\r\nc");
        assert_eq!(doc.len_lines(), 2);
        // "a\rb\r" is line 0; the \r before \n is content.
        assert_eq!(doc.line_len_chars(0).unwrap(), 4);
    }

    #[test]
    fn test_unicode_line_breaks_are_content() {
        let doc = Document::from("a\u{2028}b\u{85}c");
        assert_eq!(doc.len_lines(), 1);
        assert_eq!(doc.line_len_chars(0).unwrap(), 5);
    }

    // ── Editing ──────────────────────────────────────────────────────

    #[test]
    fn test_insert_and_remove() {
        let mut doc = Document::new();
        doc.insert(0, "hello").unwrap();
        doc.insert(5, " world").unwrap();
        assert_eq!(doc.to_string(), "hello world");
        doc.remove(5, 11).unwrap();
        assert_eq!(doc.to_string(), "hello");
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Document::from("abc");
        let mut edited = original.clone();
        edited.insert(3, "def").unwrap();
        assert_eq!(original.to_string(), "abc");
        assert_eq!(edited.to_string(), "abcdef");
        assert_ne!(original, edited);
    }

    #[test]
    fn test_remove_across_lines() {
        let mut doc = Document::from("hello\nworld\nfoo");
        doc.remove(3, 9).unwrap();
        assert_eq!(doc.to_string(), "helld\nfoo");
    }

    #[test]
    fn test_unicode_chars_are_single_units() {
        let mut doc = Document::from("a🌍b");
        assert_eq!(doc.len_chars(), 3);
        assert_eq!(doc.char_at(1).unwrap(), '🌍');
        doc.remove(1, 2).unwrap();
        assert_eq!(doc.to_string(), "ab");
    }

    // ── Iteration ────────────────────────────────────────────────────

    #[test]
    fn test_chars_after_and_before() {
        let doc = Document::from("ab\ncd");
        let after: String = doc.chars_after(2).unwrap().collect();
        assert_eq!(after, "\ncd");
        let before: String = doc.chars_before(4).unwrap().collect();
        assert_eq!(before, "c\nba");
        assert_eq!(doc.chars_before(0).unwrap().count(), 0);
        assert_eq!(doc.chars_after(5).unwrap().count(), 0);
    }

    // ── Error paths ──────────────────────────────────────────────────

    #[test]
    fn test_out_of_bounds() {
        let mut doc = Document::from("hello");
        assert!(doc.line(1).is_err());
        assert!(doc.line_to_char(1).is_err());
        assert!(doc.line_len_chars(3).is_err());
        assert!(doc.char_at(5).is_err());
        assert!(doc.char_to_line(6).is_err());
        assert!(doc.chars_after(6).is_err());
        assert!(doc.chars_before(6).is_err());
        assert!(doc.slice(3, 1).is_err());
        assert!(doc.slice(0, 100).is_err());
        assert!(doc.insert(6, "x").is_err());
        assert!(doc.remove(0, 6).is_err());
        assert_eq!(doc.to_string(), "hello");
    }

    #[test]
    fn test_char_to_line_at_end_is_last_line() {
        let doc = Document::from("abc\ndef");
        assert_eq!(doc.char_to_line(7).unwrap(), 1);
        assert_eq!(doc.char_to_line(3).unwrap(), 0);
        assert_eq!(doc.char_to_line(4).unwrap(), 1);
    }

    #[test]
    fn test_slice() {
        let doc = Document::from("hello world");
        assert_eq!(doc.slice(6, 11).unwrap().to_string(), "world");
        assert_eq!(doc.slice(2, 2).unwrap().to_string(), "");
    }
}
