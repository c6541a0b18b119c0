//! Parsed YAML values that remember where they came from.

use serde_yaml::{Mapping, Value};
use tower_lsp::lsp_types::{Position, Range};

/// A YAML value with its 0-based source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub start: Position,
    pub end: Position,
    pub data: NodeData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Scalar { value: String, style: ScalarStyle },
    Sequence { style: SequenceStyle, items: Vec<Node> },
    Mapping { entries: Vec<(Node, Node)> },
}

/// Kind of node, without its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
    /// `*anchor` reference; the value is the alias text itself
    Alias,
    /// `key:` with nothing after it
    Null,
}

/// How a sequence is written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStyle {
    /// One `- item` per line
    Block,
    /// `[a, b, c]`
    Flow,
}

impl Node {
    pub fn scalar(value: impl Into<String>, style: ScalarStyle, start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            data: NodeData::Scalar {
                value: value.into(),
                style,
            },
        }
    }

    pub fn empty_mapping(at: Position) -> Self {
        Self {
            start: at,
            end: at,
            data: NodeData::Mapping {
                entries: Vec::new(),
            },
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Scalar { .. } => NodeKind::Scalar,
            NodeData::Sequence { .. } => NodeKind::Sequence,
            NodeData::Mapping { .. } => NodeKind::Mapping,
        }
    }

    pub fn range(&self) -> Range {
        Range {
            start: self.start,
            end: self.end,
        }
    }

    /// Raw scalar text. `None` for collections.
    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            NodeData::Scalar { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(
            self.data,
            NodeData::Scalar {
                style: ScalarStyle::Null,
                ..
            }
        )
    }

    pub fn items(&self) -> &[Node] {
        match &self.data {
            NodeData::Sequence { items, .. } => items,
            _ => &[],
        }
    }

    pub fn entries(&self) -> &[(Node, Node)] {
        match &self.data {
            NodeData::Mapping { entries } => entries,
            _ => &[],
        }
    }

    /// Value for a scalar key of a mapping node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries()
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Convert into a `serde_yaml::Value` for typed decoding.
    ///
    /// Scalars stay strings (catalog fields are textual), except for
    /// nulls which become `Value::Null` so optional fields decode as absent.
    pub fn to_value(&self) -> Value {
        match &self.data {
            NodeData::Scalar { value, style } => match style {
                ScalarStyle::Null => Value::Null,
                ScalarStyle::Plain if is_null_literal(value) => Value::Null,
                _ => Value::String(value.clone()),
            },
            NodeData::Sequence { items, .. } => {
                Value::Sequence(items.iter().map(Node::to_value).collect())
            }
            NodeData::Mapping { entries } => {
                let mut mapping = Mapping::new();
                for (key, value) in entries {
                    mapping.insert(key.to_value(), value.to_value());
                }
                Value::Mapping(mapping)
            }
        }
    }
}

fn is_null_literal(value: &str) -> bool {
    matches!(value, "" | "~" | "null" | "Null" | "NULL")
}
