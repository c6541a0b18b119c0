//! Position encoding negotiation
//!
//! Positions inside the server count Unicode scalar values. Clients that
//! cannot take UTF-32 positions get UTF-16 code units, the protocol default,
//! converted line by line against the text the position refers to.

use ropey::Rope;
use tower_lsp::lsp_types::{ClientCapabilities, Position, PositionEncodingKind, Range};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PositionEncoding {
    #[default]
    Utf16,
    Utf32,
}

impl PositionEncoding {
    /// UTF-32 when the client offers it, UTF-16 otherwise.
    pub fn negotiate(capabilities: &ClientCapabilities) -> Self {
        let offered = capabilities
            .general
            .as_ref()
            .and_then(|general| general.position_encodings.as_ref());
        match offered {
            Some(kinds) if kinds.contains(&PositionEncodingKind::UTF32) => PositionEncoding::Utf32,
            _ => PositionEncoding::Utf16,
        }
    }

    pub fn kind(self) -> PositionEncodingKind {
        match self {
            PositionEncoding::Utf16 => PositionEncodingKind::UTF16,
            PositionEncoding::Utf32 => PositionEncodingKind::UTF32,
        }
    }

    /// Client position in `text` to a character position.
    pub fn to_chars(self, text: &Rope, position: Position) -> Position {
        let line = position.line as usize;
        if self == PositionEncoding::Utf32 || line >= text.len_lines() {
            return position;
        }
        let line_start = text.line_to_char(line);
        let start = text.char_to_utf16_cu(line_start);
        let end = text.char_to_utf16_cu(line_start + text.line(line).len_chars());
        let unit = (start + position.character as usize).min(end);
        Position::new(position.line, (text.utf16_cu_to_char(unit) - line_start) as u32)
    }

    /// Character position in `text` to a client position.
    pub fn from_chars(self, text: &Rope, position: Position) -> Position {
        let line = position.line as usize;
        if self == PositionEncoding::Utf32 || line >= text.len_lines() {
            return position;
        }
        let line_start = text.line_to_char(line);
        let character = (position.character as usize).min(text.line(line).len_chars());
        let units = text.char_to_utf16_cu(line_start + character) - text.char_to_utf16_cu(line_start);
        Position::new(position.line, units as u32)
    }

    pub fn range_from_chars(self, text: &Rope, range: Range) -> Range {
        Range {
            start: self.from_chars(text, range.start),
            end: self.from_chars(text, range.end),
        }
    }
}
