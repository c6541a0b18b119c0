//! ortfo Extension for Zed
//!
//! Language support for ortfo description files:
//! - Go to definition from frontmatter tags and technologies into their catalogs
//! - Hover to see a tag's or technology's description
//!
//! Requires: ortfols in PATH (install via `cargo install --path .` from the repository root)

use zed_extension_api::{self as zed, LanguageServerId, Result};

struct OrtfoExtension;

impl zed::Extension for OrtfoExtension {
    fn new() -> Self {
        Self
    }

    fn language_server_command(
        &mut self,
        _language_server_id: &LanguageServerId,
        worktree: &zed::Worktree,
    ) -> Result<zed::Command> {
        let path = worktree
            .which("ortfols")
            .ok_or_else(|| "ortfols not found in PATH. Install with: cargo install --path .".to_string())?;

        // Catalog locations come from the project's ortfodb.yaml
        let config = format!("{}/ortfodb.yaml", worktree.root_path());

        Ok(zed::Command {
            command: path,
            args: vec!["--config".to_string(), config],
            env: Default::default(),
        })
    }
}

zed::register_extension!(OrtfoExtension);
