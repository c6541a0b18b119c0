//! Frontmatter extraction and the ordered key/value model built from it.

use std::sync::OnceLock;

use regex::Regex;
use tower_lsp::lsp_types::{Position, Range};

use crate::error::FrontmatterParseError;
use crate::locate::{self, Located};
use crate::yaml::{self, Node, NodeData};

fn separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"^---\s*$").expect("separator pattern is valid"))
}

/// Split the frontmatter block off the top of a document.
///
/// Returns the text from line 0 through the first separator line found after
/// line 0, and that separator's line number. `("", 0)` when there is none.
/// A leading byte order mark is dropped.
pub fn extract(text: &str) -> (String, u32) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text.split('\n').collect();
    for (number, line) in lines.iter().enumerate().skip(1) {
        if separator().is_match(line) {
            return (lines[..=number].join("\n"), number as u32);
        }
    }
    (String::new(), 0)
}

/// One top-level `key: value` entry of the frontmatter.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub key: String,
    pub key_node: Node,
    pub value: Node,
    /// From the key to the next key, or to the closing separator.
    pub span: Range,
}

/// Parsed frontmatter: top-level pairs in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    pairs: Vec<Pair>,
    ends_at: u32,
}

impl Frontmatter {
    /// Extract and parse the frontmatter of a whole document.
    pub fn parse(text: &str) -> Result<Self, FrontmatterParseError> {
        let (raw, ends_at) = extract(text);
        if ends_at == 0 {
            return Ok(Self::default());
        }

        let entries = match yaml::parse(&raw)? {
            Some(Node {
                data: NodeData::Mapping { entries },
                ..
            }) => entries,
            _ => Vec::new(),
        };

        let closing = Position::new(ends_at, 0);
        let key_starts: Vec<Position> = entries.iter().map(|(key, _)| key.start).collect();
        let pairs = entries
            .into_iter()
            .enumerate()
            .map(|(index, (key_node, value))| Pair {
                key: key_node.as_str().unwrap_or_default().to_string(),
                span: Range {
                    start: key_node.start,
                    end: key_starts.get(index + 1).copied().unwrap_or(closing),
                },
                key_node,
                value,
            })
            .collect();

        Ok(Self { pairs, ends_at })
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Line of the closing separator; 0 when the document has no frontmatter.
    pub fn ends_at(&self) -> u32 {
        self.ends_at
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Pair> {
        self.pairs.iter().find(|pair| pair.key == key)
    }

    /// Whether the cursor sits before the closing separator line.
    pub fn contains(&self, cursor: Position) -> bool {
        cursor.line < self.ends_at
    }

    /// Key and value node under the cursor. See [`locate::locate`].
    pub fn locate(&self, cursor: Position) -> Option<Located<'_>> {
        locate::locate(self, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_stops_at_closing_separator() {
        let text = "---\ntitle: Hello\n---\n\n# Body\n---\n";
        let (raw, ends_at) = extract(text);
        assert_eq!(raw, "---\ntitle: Hello\n---");
        assert_eq!(ends_at, 2);
    }

    #[test]
    fn test_extract_accepts_trailing_whitespace() {
        let (_, ends_at) = extract("---\ntitle: x\n---  \r\nbody");
        assert_eq!(ends_at, 2);
    }

    #[test]
    fn test_byte_order_mark_is_dropped() {
        let text = "\u{feff}---\ntags: [prints]\n---\n";
        assert_eq!(extract(text), ("---\ntags: [prints]\n---".to_string(), 2));

        let frontmatter = Frontmatter::parse(text).unwrap();
        let tags = frontmatter.get("tags").unwrap();
        assert_eq!(tags.value.items()[0].start, Position::new(1, 7));
    }

    #[test]
    fn test_extract_without_closing_separator() {
        assert_eq!(extract("---\ntitle: x\nbody"), (String::new(), 0));
        assert_eq!(extract("---"), (String::new(), 0));
        assert_eq!(extract(""), (String::new(), 0));
    }

    #[test]
    fn test_parse_pairs_and_spans() {
        let text = "---\ntitle: Hello\ntags:\n  - a\n  - b\nwip: true\n---\nbody\n";
        let frontmatter = Frontmatter::parse(text).unwrap();

        let keys: Vec<&str> = frontmatter.pairs().iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["title", "tags", "wip"]);
        assert_eq!(frontmatter.ends_at(), 6);

        let tags = frontmatter.get("tags").unwrap();
        assert_eq!(tags.span.start, Position::new(2, 0));
        assert_eq!(tags.span.end, Position::new(5, 0));

        let wip = frontmatter.get("wip").unwrap();
        assert_eq!(wip.span.end, Position::new(6, 0));
    }

    #[test]
    fn test_parse_without_frontmatter() {
        let frontmatter = Frontmatter::parse("# Just a body\n").unwrap();
        assert!(frontmatter.is_empty());
        assert_eq!(frontmatter.ends_at(), 0);
        assert!(!frontmatter.contains(Position::new(0, 0)));
    }

    #[test]
    fn test_parse_non_mapping_frontmatter() {
        let frontmatter = Frontmatter::parse("---\n- a\n- b\n---\n").unwrap();
        assert!(frontmatter.is_empty());
        assert_eq!(frontmatter.ends_at(), 3);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = Frontmatter::parse("---\ntags: [a, b\n---\n").unwrap_err();
        assert!(!err.message.is_empty());
    }
}
