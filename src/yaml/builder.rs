//! Event receiver assembling [`Node`] trees from yaml-rust2's marked events.

use tower_lsp::lsp_types::Position;
use yaml_rust2::parser::{Event, MarkedEventReceiver};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use super::node::{Node, NodeData, ScalarStyle, SequenceStyle};
use super::source::SourceText;

pub(super) struct NodeBuilder<'a> {
    source: &'a SourceText,
    stack: Vec<Partial>,
    root: Option<Node>,
}

/// A collection whose closing event has not been seen yet.
enum Partial {
    Sequence {
        start: Position,
        style: SequenceStyle,
        items: Vec<Node>,
    },
    Mapping {
        start: Position,
        flow: bool,
        entries: Vec<(Node, Option<Node>)>,
    },
}

impl<'a> NodeBuilder<'a> {
    pub(super) fn new(source: &'a SourceText) -> Self {
        Self {
            source,
            stack: Vec::new(),
            root: None,
        }
    }

    pub(super) fn finish(self) -> Option<Node> {
        self.root
    }

    fn push_complete(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
            Some(Partial::Sequence { items, .. }) => items.push(node),
            Some(Partial::Mapping { entries, .. }) => {
                if let Some((_, value)) = entries.last_mut() {
                    if value.is_none() {
                        *value = Some(node);
                        return;
                    }
                }
                entries.push((node, None));
            }
        }
    }

    fn on_scalar(&mut self, value: String, style: TScalarStyle, offset: usize) {
        let style = match style {
            TScalarStyle::Plain if value.is_empty() => ScalarStyle::Null,
            TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
            TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
            TScalarStyle::Literal => ScalarStyle::Literal,
            TScalarStyle::Folded => ScalarStyle::Folded,
            #[allow(unreachable_patterns)]
            _ => ScalarStyle::Plain,
        };

        // Block scalars are marked on their first content line; their span
        // starts at the `|` or `>` header.
        let offset = match style {
            ScalarStyle::Literal | ScalarStyle::Folded => self.block_header(offset).unwrap_or(offset),
            _ => offset,
        };
        let start = self.source.position(offset);
        let end = self.scalar_end(offset, start, &value, style);
        self.push_complete(Node::scalar(value, style, start, end));
    }

    /// Offset of the block scalar header owning content marked at `offset`.
    fn block_header(&self, offset: usize) -> Option<usize> {
        if matches!(self.source.char_at(offset), Some('|' | '>')) {
            return Some(offset);
        }
        let line = self.source.position(offset).line as usize;
        let header_line = (0..line).rev().find(|&l| !self.source.is_blank(l))?;
        let chars = self.source.line(header_line);

        let mut content = chars.len();
        for (i, c) in chars.iter().enumerate() {
            if *c == '#' && (i == 0 || chars[i - 1].is_whitespace()) {
                content = i;
                break;
            }
        }
        while content > 0 && chars[content - 1].is_whitespace() {
            content -= 1;
        }
        let token = chars[..content]
            .iter()
            .rposition(|c| c.is_whitespace())
            .map(|i| i + 1)
            .unwrap_or(0);

        match chars.get(token) {
            Some('|' | '>') if token < content => Some(self.source.line_start(header_line) + token),
            _ => None,
        }
    }

    fn on_alias(&mut self, offset: usize) {
        let start = self.source.position(offset);
        let mut text = String::new();
        let mut cursor = offset;
        while let Some(c) = self.source.char_at(cursor) {
            if c.is_whitespace() || matches!(c, ',' | '[' | ']' | '{' | '}') {
                break;
            }
            text.push(c);
            cursor += 1;
        }
        let end = self.source.position(cursor);
        self.push_complete(Node::scalar(text, ScalarStyle::Alias, start, end));
    }

    fn scalar_end(&self, offset: usize, start: Position, value: &str, style: ScalarStyle) -> Position {
        match style {
            ScalarStyle::Null => start,
            ScalarStyle::Plain | ScalarStyle::Alias => {
                if self.source.matches_at(offset, value) {
                    self.source.position(offset + value.chars().count())
                } else {
                    // folded across lines
                    self.continuation_end(start.line as usize)
                }
            }
            ScalarStyle::SingleQuoted | ScalarStyle::DoubleQuoted => self.quoted_end(offset, style),
            ScalarStyle::Literal | ScalarStyle::Folded => self.continuation_end(start.line as usize),
        }
    }

    /// Position just past the closing quote of a quoted scalar starting at `offset`.
    fn quoted_end(&self, offset: usize, style: ScalarStyle) -> Position {
        let mut cursor = offset + 1;
        while let Some(c) = self.source.char_at(cursor) {
            match (style, c) {
                (ScalarStyle::SingleQuoted, '\'') => {
                    if self.source.char_at(cursor + 1) == Some('\'') {
                        cursor += 2;
                        continue;
                    }
                    return self.source.position(cursor + 1);
                }
                (ScalarStyle::DoubleQuoted, '\\') => {
                    cursor += 2;
                    continue;
                }
                (ScalarStyle::DoubleQuoted, '"') => return self.source.position(cursor + 1),
                _ => {}
            }
            cursor += 1;
        }
        self.source.position(self.source.len())
    }

    /// End of the last line indented deeper than `line`, skipping blank lines.
    fn continuation_end(&self, line: usize) -> Position {
        let base = self.source.indent_of(line);
        let mut last = line;
        for next in line + 1..self.source.line_count() {
            if self.source.is_blank(next) {
                continue;
            }
            if self.source.indent_of(next) <= base {
                break;
            }
            last = next;
        }
        self.source.line_end(last)
    }

    /// End of a collection: past its closing bracket in flow style, otherwise
    /// the end of its last child.
    fn collection_end(&self, offset: usize, close: char, last_child: Option<&Node>, start: Position) -> Position {
        if self.source.char_at(offset) == Some(close) {
            return self.source.position(offset + 1);
        }
        last_child.map(|node| node.end).unwrap_or(start)
    }
}

impl MarkedEventReceiver for NodeBuilder<'_> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        let offset = marker.index();
        match ev {
            Event::Scalar(value, style, ..) => self.on_scalar(value, style, offset),
            Event::Alias(..) => self.on_alias(offset),
            Event::SequenceStart(..) => {
                let style = if self.source.char_at(offset) == Some('[') {
                    SequenceStyle::Flow
                } else {
                    SequenceStyle::Block
                };
                self.stack.push(Partial::Sequence {
                    start: self.source.position(offset),
                    style,
                    items: Vec::new(),
                });
            }
            Event::MappingStart(..) => {
                self.stack.push(Partial::Mapping {
                    start: self.source.position(offset),
                    flow: self.source.char_at(offset) == Some('{'),
                    entries: Vec::new(),
                });
            }
            Event::SequenceEnd => {
                if let Some(Partial::Sequence { start, style, items }) = self.stack.pop() {
                    let end = match style {
                        SequenceStyle::Flow => self.collection_end(offset, ']', items.last(), start),
                        SequenceStyle::Block => items.last().map(|node| node.end).unwrap_or(start),
                    };
                    self.push_complete(Node {
                        start,
                        end,
                        data: NodeData::Sequence { style, items },
                    });
                }
            }
            Event::MappingEnd => {
                if let Some(Partial::Mapping { start, flow, entries }) = self.stack.pop() {
                    let entries: Vec<(Node, Node)> = entries
                        .into_iter()
                        .filter_map(|(key, value)| value.map(|value| (key, value)))
                        .collect();
                    let last_value = entries.last().map(|(_, value)| value);
                    let end = if flow {
                        self.collection_end(offset, '}', last_value, start)
                    } else {
                        last_value.map(|node| node.end).unwrap_or(start)
                    };
                    // Block mappings are marked at their first key's indicator.
                    let start = match entries.first() {
                        Some((key, _)) if !flow => key.start,
                        _ => start,
                    };
                    self.push_complete(Node {
                        start,
                        end,
                        data: NodeData::Mapping { entries },
                    });
                }
            }
            _ => {}
        }
    }
}
