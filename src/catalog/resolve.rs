//! Alias resolution against a loaded catalog.

use tower_lsp::lsp_types::Position;
use tracing::debug;

use super::entry::CatalogEntry;
use super::repository::Catalog;
use crate::error::{OrtfoError, OrtfoResult};
use crate::yaml::Node;

/// A catalog entry matched by alias, with the node it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'c, T> {
    pub node: &'c Node,
    pub entry: T,
}

impl<T> Resolved<'_, T> {
    /// Where the entry starts in its catalog file.
    pub fn position(&self) -> Position {
        self.node.start
    }
}

/// First entry of `catalog`, in document order, referred to by `alias`.
///
/// Every entry up to the match is decoded; the first one that fails to
/// decode aborts the lookup with [`OrtfoError::EntryDecode`].
pub fn resolve<'c, T: CatalogEntry>(alias: &str, catalog: &'c Catalog) -> OrtfoResult<Resolved<'c, T>> {
    debug!(alias, kind = T::KIND, catalog = %catalog.path.display(), "resolving alias");
    for node in &catalog.entries {
        let entry: T = serde_yaml::from_value(node.to_value()).map_err(|source| OrtfoError::EntryDecode {
            kind: T::KIND,
            line: node.start.line,
            source,
        })?;

        if entry.referred_to_by(alias) {
            debug!(alias, line = node.start.line, "alias resolved");
            return Ok(Resolved { node, entry });
        }
    }

    Err(OrtfoError::NotFound {
        kind: T::KIND,
        alias: alias.to_string(),
    })
}
