//! LSP Capabilities
//!
//! Defines what features the server supports.

use tower_lsp::lsp_types::*;

/// Get the server capabilities
pub fn get_server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        // Full document sync - every query re-parses the whole frontmatter.
        // Saves drop the cached text so the next query reads the file.
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::FULL),
                save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                ..Default::default()
            },
        )),

        // Hover for tag and technology descriptions
        hover_provider: Some(HoverProviderCapability::Simple(true)),

        // Go to definition into the catalog files
        definition_provider: Some(OneOf::Left(true)),

        ..Default::default()
    }
}

pub fn get_server_info() -> ServerInfo {
    ServerInfo {
        name: "ortfols".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
