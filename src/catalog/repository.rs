//! Catalog files and the per-path cache holding them.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use ropey::Rope;
use tracing::info;

use crate::error::{OrtfoError, OrtfoResult};
use crate::yaml::{self, Node, NodeData};

/// A catalog file: its entries as raw nodes, in document order.
///
/// Entries are decoded lazily during resolution, so a malformed entry only
/// fails the lookups that reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub path: PathBuf,
    pub entries: Vec<Node>,
    /// Source text, for mapping entry positions to client encodings
    pub content: Rope,
}

impl Catalog {
    pub fn load(path: &Path) -> OrtfoResult<Self> {
        let contents = fs::read_to_string(path).map_err(|err| OrtfoError::io(path, err))?;
        Self::parse(path, &contents)
    }

    /// Parse catalog contents; the top level must be a sequence.
    pub fn parse(path: impl Into<PathBuf>, contents: &str) -> OrtfoResult<Self> {
        let path = path.into();
        let root = yaml::parse(contents).map_err(|err| OrtfoError::CatalogParse {
            path: path.clone(),
            message: err.to_string(),
        })?;

        let entries = match root {
            None => Vec::new(),
            Some(node) if node.is_null() => Vec::new(),
            Some(Node {
                data: NodeData::Sequence { items, .. },
                ..
            }) => items,
            Some(node) => {
                return Err(OrtfoError::CatalogParse {
                    path,
                    message: format!("expected a sequence of entries, found {:?}", node.kind()),
                })
            }
        };

        info!(path = %path.display(), entries = entries.len(), "loaded catalog");
        Ok(Self {
            path,
            entries,
            content: Rope::from_str(contents),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Catalogs by path, loaded on first use and kept for the process lifetime.
///
/// Failed loads are not cached: the next lookup reads the file again.
#[derive(Debug, Default)]
pub struct CatalogCache {
    catalogs: DashMap<PathBuf, Arc<Catalog>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self {
            catalogs: DashMap::new(),
        }
    }

    /// Cached catalog for `path`, loading it on a miss.
    ///
    /// The map entry stays locked while loading, so concurrent misses on the
    /// same path read the file once.
    pub fn get_or_load(&self, path: &Path) -> OrtfoResult<Arc<Catalog>> {
        match self.catalogs.entry(path.to_path_buf()) {
            MapEntry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            MapEntry::Vacant(entry) => {
                let catalog = Arc::new(Catalog::load(path)?);
                entry.insert(Arc::clone(&catalog));
                Ok(catalog)
            }
        }
    }

    pub fn get(&self, path: &Path) -> Option<Arc<Catalog>> {
        self.catalogs.get(path).map(|catalog| Arc::clone(catalog.value()))
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}
