//! Cursor locator: which frontmatter key, and which list element, is under
//! the cursor.
//!
//! A pair claims the cursor from its key until the next key starts after
//! the cursor. This is a "last key reached" rule rather than a span
//! containment test, so whitespace and comments between two keys belong to
//! the earlier one.

use tower_lsp::lsp_types::Position;
use tracing::debug;

use crate::frontmatter::Frontmatter;
use crate::yaml::{Node, NodeData, SequenceStyle};

/// The frontmatter key under the cursor and the scalar it resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located<'a> {
    pub key: &'a str,
    pub node: &'a Node,
}

/// Find the key and scalar value under `cursor`.
///
/// `None` outside the frontmatter block, on nested mappings, on empty
/// values and on empty sequences.
pub fn locate(frontmatter: &Frontmatter, cursor: Position) -> Option<Located<'_>> {
    if !frontmatter.contains(cursor) {
        debug!(?cursor, ends_at = frontmatter.ends_at(), "cursor outside frontmatter");
        return None;
    }

    let pairs = frontmatter.pairs();
    let (index, pair) = pairs.iter().enumerate().find(|(index, _)| {
        pairs
            .get(index + 1)
            .map_or(true, |next| is_after(next.key_node.start, cursor))
    })?;
    debug!(key = %pair.key, index, "frontmatter key claims cursor");

    let node = match &pair.value.data {
        NodeData::Sequence { .. } => closest_element(&pair.value, cursor)?,
        NodeData::Scalar { .. } => &pair.value,
        NodeData::Mapping { .. } => return None,
    };

    if node.is_null() || node.as_str().is_none() {
        return None;
    }

    Some(Located {
        key: &pair.key,
        node,
    })
}

/// Element of a sequence closest to the cursor.
///
/// Block sequences compare lines only, so anything on an item's line, or on
/// a continuation line before the next item, resolves to that item. Flow
/// sequences compare full positions. The last element is the fallback.
pub fn closest_element(sequence: &Node, cursor: Position) -> Option<&Node> {
    let NodeData::Sequence { style, items } = &sequence.data else {
        return None;
    };

    let closest = items.iter().enumerate().find_map(|(index, item)| match items.get(index + 1) {
        None => Some(item),
        Some(next) if is_after_cursor(*style, next, cursor) => Some(item),
        Some(_) => None,
    });
    debug!(?style, ?cursor, found = closest.is_some(), "closest sequence element");
    closest
}

fn is_after_cursor(style: SequenceStyle, node: &Node, cursor: Position) -> bool {
    match style {
        SequenceStyle::Flow => is_after(node.start, cursor),
        SequenceStyle::Block => node.start.line > cursor.line,
    }
}

/// Whether `a` comes strictly after `b` in the document.
pub fn is_after(a: Position, b: Position) -> bool {
    (a.line, a.character) > (b.line, b.character)
}
