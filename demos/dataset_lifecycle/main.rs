//! # Dataset Lifecycle
//!
//! Creates a dataset, adds a text document and a few hand-written segments,
//! lists what was created, then deletes the dataset again.
//!
//! Requires: `DIFY_API_KEY` (a dataset API key); optional `DIFY_API_URL`.
//!
//! Run: `cargo run -p dify-knowledge-demos --example dataset_lifecycle`

use dify_knowledge::{
    DocumentTextUpdate, IndexingTechnique, Pagination, Permission, SegmentPayload,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = dify_knowledge_demos::init()?;

    // -- 1. Create an empty dataset --------------------------------------
    let dataset = client.create_dataset("demo-handbook", Some(Permission::OnlyMe)).await?;
    info!(dataset.id = %dataset.id, "dataset created");

    // -- 2. Add a document from text -------------------------------------
    // Economy indexing keeps the demo cheap; the process rule defaults to automatic.
    let created = client
        .create_document_from_text(
            &dataset.id,
            "refunds",
            "Refunds are accepted within 30 days of purchase.\n\nShipping is free over $50.",
            Some(IndexingTechnique::Economy),
            None,
        )
        .await?;
    let document_id = created.document.id.clone();
    info!(document.id = %document_id, batch = %created.batch, "document created");

    // -- 3. Rename it ------------------------------------------------------
    client
        .update_document_via_text(
            &dataset.id,
            &document_id,
            &DocumentTextUpdate::new().with_name("refund-policy"),
        )
        .await?;

    // -- 4. Add segments by hand -------------------------------------------
    let segments = [
        SegmentPayload::new("Refund window is 30 days.").with_keywords(["refund", "window"]),
        SegmentPayload::new("Free shipping threshold is $50.").with_keywords(["shipping"]),
    ];
    let added = client.add_segments(&dataset.id, &document_id, &segments).await?;
    info!(segments.count = added.data.len(), "segments added");

    // -- 5. Look around ------------------------------------------------------
    for document in client.list_documents(&dataset.id, Pagination::default()).await? {
        println!("document {} {:?}", document.name, document.indexing_status);
    }
    let listed = client.list_segments(&dataset.id, &document_id, Some("refund"), None).await?;
    for segment in &listed.data {
        println!("segment {} {}", segment.id, segment.content);
    }

    // -- 6. Clean up ---------------------------------------------------------
    if let Some(first) = added.data.first() {
        client.delete_segment(&dataset.id, &document_id, &first.id).await?;
    }
    client.delete_document(&dataset.id, &document_id).await?;
    client.delete_dataset(&dataset.id).await?;
    info!("dataset deleted");

    Ok(())
}
