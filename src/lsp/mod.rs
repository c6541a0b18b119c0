//! Language server for description documents
//!
//! Provides Language Server Protocol support for:
//! - Go to definition from a frontmatter tag or technology into its catalog
//! - Hover to see a tag's or technology's description
//!
//! Every other protocol request is answered with `method not found`.

pub mod capabilities;
pub mod document;
pub mod encoding;
pub mod server;

pub use encoding::PositionEncoding;
pub use server::run_lsp_server;
pub use server::OrtfoLsp;
