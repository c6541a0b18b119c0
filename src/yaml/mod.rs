//! Position-tracking YAML model
//!
//! Parses YAML into [`Node`] trees where every value keeps its 0-based
//! source span, so that editor positions can be mapped back onto values.
//! Built on yaml-rust2's marked event stream; only the first document of
//! the input is read.

mod builder;
mod node;
mod source;

pub use node::{Node, NodeData, NodeKind, ScalarStyle, SequenceStyle};
pub use source::SourceText;

use yaml_rust2::parser::Parser;

use crate::error::FrontmatterParseError;
use builder::NodeBuilder;

/// Parse the first YAML document of `text`.
///
/// Returns `Ok(None)` when the text holds no document at all.
pub fn parse(text: &str) -> Result<Option<Node>, FrontmatterParseError> {
    let source = SourceText::new(text);
    let mut builder = NodeBuilder::new(&source);
    let mut parser = Parser::new_from_str(text);
    parser.load(&mut builder, false)?;
    Ok(builder.finish())
}
