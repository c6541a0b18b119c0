//! ortfols - language server for ortfo description files
//!
//! Description files start with a YAML frontmatter block whose `tags` and
//! `made with` fields refer to entries of external catalogs. This library
//! finds which frontmatter value sits under an editor cursor and resolves it
//! against those catalogs, for go-to-definition and hover.
//!
//! # Example
//!
//! ```no_run
//! use ortfols::config::Configuration;
//! use ortfols::query::QueryService;
//! use std::path::Path;
//! use tower_lsp::lsp_types::{Position, Url};
//!
//! let config = Configuration::load(Path::new("ortfodb.yaml"))?;
//! let service = QueryService::new(config);
//!
//! let uri = Url::parse("file:///portfolio/sculpture/description.md").unwrap();
//! if let Some(hover) = service.hover(&uri, Position::new(2, 6))? {
//!     println!("{:?}", hover.contents);
//! }
//! # Ok::<(), ortfols::error::OrtfoError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod locate;
pub mod lsp;
pub mod query;
pub mod yaml;

// Re-export commonly used types
pub use error::{OrtfoError, OrtfoResult};
pub use frontmatter::Frontmatter;
pub use query::{QueryService, ReferenceKind};
