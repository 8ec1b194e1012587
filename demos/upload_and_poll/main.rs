//! # Upload and Poll
//!
//! Uploads a local file into an existing dataset and polls its indexing
//! status until the server reports it finished.
//!
//! Requires: `DIFY_API_KEY`; optional `DIFY_API_URL`.
//!
//! Run: `cargo run -p dify-knowledge-demos --example upload_and_poll -- <dataset-id> <file>`

use std::time::Duration;

use anyhow::{Context, bail};
use dify_knowledge::{PreProcessingRuleId, ProcessRules, Segmentation};
use serde_json::Value;
use tracing::{info, warn};

const POLL_INTERVAL: Duration = Duration::from_secs(2);
const MAX_POLLS: usize = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = dify_knowledge_demos::init()?;

    let mut args = std::env::args().skip(1);
    let (Some(dataset_id), Some(file_path)) = (args.next(), args.next()) else {
        bail!("usage: upload_and_poll <dataset-id> <file>");
    };

    let rules = ProcessRules::new(Segmentation::new("\n\n", 500))
        .with_pre_processing(PreProcessingRuleId::RemoveExtraSpaces, true)
        .with_pre_processing(PreProcessingRuleId::RemoveUrlsEmails, false);

    let created = client
        .create_document_from_file(&dataset_id, &file_path, Some(rules.into()), None, None)
        .await
        .with_context(|| format!("failed to upload {file_path}"))?;
    info!(document.id = %created.document.id, batch = %created.batch, "upload accepted");

    // Polling lives here, not in the client: each call is a single request.
    for _ in 0..MAX_POLLS {
        let status = client.get_index_status(&dataset_id, &created.batch).await?;
        let states: Vec<&str> = status["data"]
            .as_array()
            .map(|docs| docs.iter().filter_map(|d| d["indexing_status"].as_str()).collect())
            .unwrap_or_default();
        info!(?states, "indexing status");

        if !states.is_empty() && states.iter().all(|s| matches!(*s, "completed" | "error")) {
            println!("{}", serde_json::to_string_pretty(&status)?);
            return Ok(());
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    warn!("indexing still running after {} polls", MAX_POLLS);
    let last: Value = client.get_index_status(&dataset_id, &created.batch).await?;
    println!("{}", serde_json::to_string_pretty(&last)?);
    Ok(())
}
