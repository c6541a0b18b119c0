use std::path::PathBuf;

use thiserror::Error;
use tower_lsp::lsp_types::Url;

pub type OrtfoResult<T> = Result<T, OrtfoError>;

#[derive(Error, Debug)]
pub enum OrtfoError {
    #[error("while reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("while parsing frontmatter: {0}")]
    FrontmatterParse(#[from] FrontmatterParseError),

    #[error("while parsing catalog {path} as YAML: {message}")]
    CatalogParse { path: PathBuf, message: String },

    #[error("while decoding {kind} entry at line {line}: {source}")]
    EntryDecode {
        kind: &'static str,
        line: u32,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{kind} {alias:?} not found in repository")]
    NotFound { kind: &'static str, alias: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("URI does not point to a local file: {0}")]
    InvalidUri(Url),
}

impl OrtfoError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OrtfoError::Io {
            path: path.into(),
            source,
        }
    }

    /// Lookups that simply found nothing; the editor gets an empty result.
    pub fn is_not_found(&self) -> bool {
        matches!(self, OrtfoError::NotFound { .. })
    }
}

/// Malformed YAML, carrying the scanner's message and 0-based location.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at line {line} column {column}")]
pub struct FrontmatterParseError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl From<yaml_rust2::ScanError> for FrontmatterParseError {
    fn from(err: yaml_rust2::ScanError) -> Self {
        let marker = err.marker();
        FrontmatterParseError {
            message: err.info().to_string(),
            line: marker.line().saturating_sub(1) as u32,
            column: marker.col() as u32,
        }
    }
}
