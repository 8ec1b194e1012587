//! Shared setup for the demo programs.

use dify_knowledge::KnowledgeBaseClient;
use tracing_subscriber::EnvFilter;

/// Loads `.env`, installs a `RUST_LOG`-driven subscriber and builds a client
/// from `DIFY_API_KEY` / `DIFY_API_URL`.
pub fn init() -> anyhow::Result<KnowledgeBaseClient> {
    if dotenvy::dotenv().is_err() {
        eprintln!("no .env file loaded; using the process environment");
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    Ok(KnowledgeBaseClient::from_env()?)
}
