//! Document management for the language server
//!
//! Description documents are cached by URI. Text comes from the editor
//! (`didOpen`/`didChange`) or, on a cache miss, from disk. The frontmatter
//! is parsed on first use and kept until the document is replaced.

use std::fs;
use std::sync::{Arc, OnceLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use ropey::Rope;
use tower_lsp::lsp_types::Url;
use tracing::debug;

use crate::error::{FrontmatterParseError, OrtfoError, OrtfoResult};
use crate::frontmatter::Frontmatter;

/// A cached description document
#[derive(Debug)]
pub struct DescriptionDocument {
    /// Document URI
    pub uri: Url,
    /// Full text
    pub content: Rope,
    /// Editor version, when the text came from the editor
    pub version: Option<i32>,
    frontmatter: OnceLock<Result<Frontmatter, FrontmatterParseError>>,
}

impl DescriptionDocument {
    pub fn new(uri: Url, content: &str, version: Option<i32>) -> Self {
        Self {
            uri,
            content: Rope::from_str(content),
            version,
            frontmatter: OnceLock::new(),
        }
    }

    /// Get document text
    pub fn text(&self) -> String {
        self.content.to_string()
    }

    pub fn line_count(&self) -> usize {
        self.content.len_lines()
    }

    /// Get line at index
    pub fn line(&self, index: usize) -> Option<String> {
        if index < self.content.len_lines() {
            Some(self.content.line(index).to_string())
        } else {
            None
        }
    }

    /// Parsed frontmatter, computed on first call.
    pub fn frontmatter(&self) -> Result<&Frontmatter, &FrontmatterParseError> {
        self.frontmatter
            .get_or_init(|| Frontmatter::parse(&self.text()))
            .as_ref()
    }
}

/// Document store for all known documents
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<DescriptionDocument>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Store text sent by the editor, replacing any cached version.
    pub fn open(&self, uri: Url, content: &str, version: i32) {
        let document = DescriptionDocument::new(uri.clone(), content, Some(version));
        self.documents.insert(uri, Arc::new(document));
    }

    pub fn update(&self, uri: Url, content: &str, version: i32) {
        self.open(uri, content, version);
    }

    /// Drop a document; the next query reads it again.
    pub fn invalidate(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    pub fn get(&self, uri: &Url) -> Option<Arc<DescriptionDocument>> {
        self.documents.get(uri).map(|doc| Arc::clone(doc.value()))
    }

    /// Cached document, read from disk on a miss.
    ///
    /// The entry stays locked while reading so concurrent misses on one URI
    /// read the file once.
    pub fn get_or_load(&self, uri: &Url) -> OrtfoResult<Arc<DescriptionDocument>> {
        match self.documents.entry(uri.clone()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let path = uri
                    .to_file_path()
                    .map_err(|_| OrtfoError::InvalidUri(uri.clone()))?;
                let content = fs::read_to_string(&path).map_err(|err| OrtfoError::io(&path, err))?;
                debug!(%uri, "loaded document from disk");
                let document = Arc::new(DescriptionDocument::new(uri.clone(), &content, None));
                entry.insert(Arc::clone(&document));
                Ok(document)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(path: &str) -> Url {
        Url::parse(&format!("file://{}", path)).unwrap()
    }

    #[test]
    fn test_open_replaces_and_resets_frontmatter() {
        let store = DocumentStore::new();
        let uri = uri("/work/description.md");

        store.open(uri.clone(), "---\ntitle: a\n---\n", 1);
        let first = store.get(&uri).unwrap();
        assert_eq!(first.frontmatter().unwrap().pairs().len(), 1);

        store.update(uri.clone(), "---\ntitle: a\ntags: [x]\n---\n", 2);
        let second = store.get(&uri).unwrap();
        assert_eq!(second.version, Some(2));
        assert_eq!(second.frontmatter().unwrap().pairs().len(), 2);
        // Earlier snapshots stay valid for in-flight queries.
        assert_eq!(first.frontmatter().unwrap().pairs().len(), 1);
    }

    #[test]
    fn test_invalidate() {
        let store = DocumentStore::new();
        let uri = uri("/work/description.md");
        store.open(uri.clone(), "text", 1);
        assert_eq!(store.len(), 1);
        store.invalidate(&uri);
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_or_load_reads_from_disk_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("description.md");
        fs::write(&path, "---\ntitle: on disk\n---\n").unwrap();
        let uri = Url::from_file_path(&path).unwrap();

        let store = DocumentStore::new();
        let loaded = store.get_or_load(&uri).unwrap();
        assert_eq!(loaded.version, None);
        assert_eq!(loaded.line(1).as_deref(), Some("title: on disk\n"));

        fs::write(&path, "changed").unwrap();
        let cached = store.get_or_load(&uri).unwrap();
        assert!(Arc::ptr_eq(&loaded, &cached));
    }

    #[test]
    fn test_get_or_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let uri = Url::from_file_path(dir.path().join("missing.md")).unwrap();
        let err = DocumentStore::new().get_or_load(&uri).unwrap_err();
        assert!(matches!(err, OrtfoError::Io { .. }));
    }

    #[test]
    fn test_broken_frontmatter_is_an_error_value() {
        let doc = DescriptionDocument::new(uri("/w/d.md"), "---\ntags: [a\n---\n", None);
        assert!(doc.frontmatter().is_err());
        assert_eq!(doc.line_count(), 4);
    }
}
