//! Definition and hover queries over description documents.
//!
//! Both queries share one path: find the document, locate the frontmatter
//! key and value under the cursor, look the key up in [`REFERENCES`], then
//! resolve the value against the matching catalog.

use std::sync::{Arc, OnceLock};

use tower_lsp::lsp_types::{Hover, HoverContents, Location, MarkupContent, MarkupKind, Position, Range, Url};
use tracing::debug;

use crate::catalog::{resolve, Catalog, CatalogCache, Entry, Tag, Technology};
use crate::config::Configuration;
use crate::error::{OrtfoError, OrtfoResult};
use crate::lsp::document::DocumentStore;
use crate::lsp::encoding::PositionEncoding;

/// Catalogs a frontmatter value can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Tags,
    Technologies,
}

impl ReferenceKind {
    pub fn name(self) -> &'static str {
        match self {
            ReferenceKind::Tags => "tags",
            ReferenceKind::Technologies => "technologies",
        }
    }
}

/// Frontmatter keys whose values refer to catalog entries.
pub const REFERENCES: &[(&str, ReferenceKind)] = &[
    ("tags", ReferenceKind::Tags),
    ("made with", ReferenceKind::Technologies),
];

pub fn reference_kind(key: &str) -> Option<ReferenceKind> {
    REFERENCES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, kind)| *kind)
}

/// A frontmatter value resolved to its catalog entry.
#[derive(Debug, Clone)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub catalog: Arc<Catalog>,
    /// Where the entry starts in the catalog file, in the client's encoding
    pub position: Position,
    pub entry: Entry,
    /// Span of the referring value in the document, in the client's encoding
    pub range: Range,
}

/// Answers definition and hover queries.
///
/// Owns the document and catalog caches; safe to share between concurrent
/// requests.
#[derive(Debug)]
pub struct QueryService {
    config: Configuration,
    documents: DocumentStore,
    catalogs: CatalogCache,
    encoding: OnceLock<PositionEncoding>,
}

impl QueryService {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            documents: DocumentStore::new(),
            catalogs: CatalogCache::new(),
            encoding: OnceLock::new(),
        }
    }

    /// Fix the encoding of client positions. Only the first call counts.
    pub fn set_position_encoding(&self, encoding: PositionEncoding) {
        if self.encoding.set(encoding).is_err() {
            debug!(?encoding, "position encoding already negotiated");
        }
    }

    /// Encoding of client positions; UTF-16 until negotiated.
    pub fn position_encoding(&self) -> PositionEncoding {
        self.encoding.get().copied().unwrap_or_default()
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn catalogs(&self) -> &CatalogCache {
        &self.catalogs
    }

    /// Location of the catalog entry referred to under the cursor.
    pub fn definition(&self, uri: &Url, cursor: Position) -> OrtfoResult<Option<Location>> {
        let Some(reference) = self.reference_at(uri, cursor)? else {
            return Ok(None);
        };

        let target = Url::from_file_path(&reference.catalog.path)
            .map_err(|_| OrtfoError::Config(format!("catalog path {} is not absolute", reference.catalog.path.display())))?;
        Ok(Some(Location {
            uri: target,
            range: Range {
                start: reference.position,
                end: reference.position,
            },
        }))
    }

    /// Description of the catalog entry referred to under the cursor.
    pub fn hover(&self, uri: &Url, cursor: Position) -> OrtfoResult<Option<Hover>> {
        let Some(reference) = self.reference_at(uri, cursor)? else {
            return Ok(None);
        };

        Ok(Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: reference.entry.markdown(),
            }),
            range: Some(reference.range),
        }))
    }

    /// Resolve whatever is under the cursor.
    ///
    /// `Ok(None)` when the cursor is outside the frontmatter, on a key that
    /// is not a reference, on an alias no entry answers to, or when the
    /// frontmatter does not parse.
    pub fn reference_at(&self, uri: &Url, cursor: Position) -> OrtfoResult<Option<Reference>> {
        let document = self.documents.get_or_load(uri)?;
        let frontmatter = match document.frontmatter() {
            Ok(frontmatter) => frontmatter,
            Err(err) => {
                debug!(%uri, %err, "frontmatter does not parse");
                return Ok(None);
            }
        };

        let encoding = self.position_encoding();
        let cursor = encoding.to_chars(&document.content, cursor);
        let Some(located) = frontmatter.locate(cursor) else {
            return Ok(None);
        };
        let Some(kind) = reference_kind(located.key) else {
            debug!(key = located.key, "key does not refer to a catalog");
            return Ok(None);
        };
        let Some(alias) = located.node.as_str() else {
            return Ok(None);
        };

        let catalog = self.catalogs.get_or_load(self.config.repository(kind)?)?;
        let resolved = match kind {
            ReferenceKind::Tags => {
                resolve::<Tag>(alias, &catalog).map(|r| (r.position(), Entry::from(r.entry)))
            }
            ReferenceKind::Technologies => {
                resolve::<Technology>(alias, &catalog).map(|r| (r.position(), Entry::from(r.entry)))
            }
        };

        match resolved {
            Ok((position, entry)) => Ok(Some(Reference {
                kind,
                catalog: Arc::clone(&catalog),
                position: encoding.from_chars(&catalog.content, position),
                entry,
                range: encoding.range_from_chars(&document.content, located.node.range()),
            })),
            Err(err) if err.is_not_found() => {
                debug!(%err, "unresolved reference");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table() {
        assert_eq!(reference_kind("tags"), Some(ReferenceKind::Tags));
        assert_eq!(reference_kind("made with"), Some(ReferenceKind::Technologies));
        assert_eq!(reference_kind("title"), None);
        assert_eq!(reference_kind("Tags"), None);
    }
}
