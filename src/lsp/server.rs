//! Language server implementation
//!
//! Thin protocol layer over [`QueryService`]: document notifications feed
//! the document cache, and saving or closing a document drops its cached
//! text. Definition and hover requests are answered by the service. Every
//! other request falls through to tower-lsp's default `method not found`
//! reply.

use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, error, info};

use super::capabilities::{get_server_capabilities, get_server_info};
use super::encoding::PositionEncoding;
use crate::error::OrtfoError;
use crate::query::QueryService;

/// Language server for description documents
pub struct OrtfoLsp {
    /// LSP client for sending notifications
    client: Client,
    service: QueryService,
}

impl OrtfoLsp {
    pub fn new(client: Client, service: QueryService) -> Self {
        Self { client, service }
    }

    pub fn service(&self) -> &QueryService {
        &self.service
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for OrtfoLsp {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let encoding = PositionEncoding::negotiate(&params.capabilities);
        info!(?encoding, "initializing");
        self.service.set_position_encoding(encoding);

        let mut capabilities = get_server_capabilities();
        capabilities.position_encoding = Some(encoding.kind());
        Ok(InitializeResult {
            capabilities,
            server_info: Some(get_server_info()),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "ortfols initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        debug!(uri = %document.uri, "didOpen");
        self.service
            .documents()
            .open(document.uri, &document.text, document.version);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        // Full sync: the last change carries the whole text
        if let Some(change) = params.content_changes.into_iter().last() {
            self.service
                .documents()
                .update(uri, &change.text, params.text_document.version);
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        debug!(uri = %params.text_document.uri, "didSave");
        self.service.documents().invalidate(&params.text_document.uri);
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.service.documents().invalidate(&params.text_document.uri);
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        debug!(%uri, ?position, "definition");

        let location = self
            .service
            .definition(&uri, position)
            .map_err(|err| query_failed("definition", err))?;
        Ok(location.map(GotoDefinitionResponse::Scalar))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        debug!(%uri, ?position, "hover");

        self.service
            .hover(&uri, position)
            .map_err(|err| query_failed("hover", err))
    }
}

/// Log a failed query and turn it into a JSON-RPC internal error.
fn query_failed(query: &str, err: OrtfoError) -> Error {
    error!(query, %err, "query failed");
    let mut rpc_error = Error::internal_error();
    rpc_error.message = format!("while answering {}: {}", query, err).into();
    rpc_error
}

/// Run the language server on stdin/stdout
pub async fn run_lsp_server(service: QueryService) {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| OrtfoLsp::new(client, service));
    Server::new(stdin, stdout, socket).serve(service).await;
}
