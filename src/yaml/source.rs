//! Character-offset to line/column mapping for parsed text.

use tower_lsp::lsp_types::Position;

/// Source text indexed by character, with the offset of every line start.
///
/// The YAML scanner reports positions as character offsets into the stream;
/// everything above this layer works in 0-based `(line, character)` pairs.
#[derive(Debug, Clone)]
pub struct SourceText {
    chars: Vec<char>,
    line_starts: Vec<usize>,
}

impl SourceText {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut line_starts = vec![0];
        for (offset, c) in chars.iter().enumerate() {
            if *c == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self { chars, line_starts }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// Position of a character offset. Offsets past the end clamp to it.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.chars.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position {
            line: line as u32,
            character: (offset - self.line_starts[line]) as u32,
        }
    }

    /// Character offset of the first character of `line`.
    pub fn line_start(&self, line: usize) -> usize {
        self.line_starts
            .get(line)
            .copied()
            .unwrap_or(self.chars.len())
    }

    /// Characters of a line, without its line break.
    pub fn line(&self, line: usize) -> &[char] {
        let Some(&start) = self.line_starts.get(line) else {
            return &[];
        };
        let mut end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.chars.len());
        if end > start && self.chars[end - 1] == '\r' {
            end -= 1;
        }
        &self.chars[start..end]
    }

    pub fn indent_of(&self, line: usize) -> usize {
        self.line(line).iter().take_while(|c| **c == ' ').count()
    }

    pub fn is_blank(&self, line: usize) -> bool {
        self.line(line).iter().all(|c| c.is_whitespace())
    }

    /// Position just past the last non-blank character of a line.
    pub fn line_end(&self, line: usize) -> Position {
        let chars = self.line(line);
        let len = chars.len() - chars.iter().rev().take_while(|c| c.is_whitespace()).count();
        Position {
            line: line as u32,
            character: len as u32,
        }
    }

    /// Whether `expected` appears verbatim starting at `offset`.
    pub fn matches_at(&self, offset: usize, expected: &str) -> bool {
        let mut cursor = offset;
        for c in expected.chars() {
            if self.char_at(cursor) != Some(c) {
                return false;
            }
            cursor += 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_of_offsets() {
        let source = SourceText::new("ab\ncde\n\nf");
        assert_eq!(source.position(0), Position::new(0, 0));
        assert_eq!(source.position(2), Position::new(0, 2));
        assert_eq!(source.position(3), Position::new(1, 0));
        assert_eq!(source.position(7), Position::new(2, 0));
        assert_eq!(source.position(8), Position::new(3, 0));
        assert_eq!(source.position(100), Position::new(3, 1));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let source = SourceText::new("é: ü\nx");
        assert_eq!(source.position(3), Position::new(0, 3));
        assert_eq!(source.char_at(3), Some('ü'));
        assert_eq!(source.position(5), Position::new(1, 0));
    }

    #[test]
    fn test_line_helpers() {
        let source = SourceText::new("top\r\n    nested  \n\n");
        assert_eq!(source.line_count(), 4);
        assert_eq!(source.line(0), &['t', 'o', 'p']);
        assert_eq!(source.indent_of(1), 4);
        assert_eq!(source.line_end(1), Position::new(1, 10));
        assert!(source.is_blank(2));
        assert!(source.line(9).is_empty());
        assert_eq!(source.line_start(1), 5);
        assert_eq!(source.line_start(9), source.len());
    }
}
