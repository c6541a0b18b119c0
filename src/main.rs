use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use ortfols::config::{Configuration, DEFAULT_CONFIG_FILE};
use ortfols::lsp::run_lsp_server;
use ortfols::query::QueryService;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ortfols")]
#[command(version)]
#[command(about = "Language server for ortfo description files")]
#[command(long_about = "ortfols - Language server for ortfo description files

Speaks the Language Server Protocol over stdin/stdout. Inside the YAML
frontmatter of a description file:

  go to definition  - jump from a tag or technology to its catalog entry
  hover             - show the entry's name and description

Catalog locations are read from the ortfodb configuration file:

  tags:
    repository: tags.yaml
  technologies:
    repository: technologies.yaml

Logging is controlled with ORTFOLS_LOG (e.g. ORTFOLS_LOG=ortfols=debug).")]
struct Cli {
    /// Path to the ortfodb configuration file
    #[arg(short, long, env = "ORTFOLS_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "ORTFOLS_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Accepted for editor clients that pass it; stdio is the only transport
    #[arg(long, hide = true)]
    stdio: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let config = Configuration::load(&cli.config)
        .with_context(|| format!("while loading configuration from {}", cli.config.display()))?;
    info!(
        tags = %config.tags.repository.display(),
        technologies = %config.technologies.repository.display(),
        "configuration loaded"
    );

    run_lsp_server(QueryService::new(config)).await;
    Ok(())
}

/// Logs go to stderr or a file: stdout carries the protocol.
fn init_tracing(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("ORTFOLS_LOG").unwrap_or_else(|_| EnvFilter::new("ortfols=info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("while opening log file {}", path.display()))?;
            subscriber
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => subscriber.with_writer(std::io::stderr).init(),
    }
    Ok(())
}
