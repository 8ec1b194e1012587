//! # dify-knowledge
//!
//! Typed async client for the Dify knowledge-base API: datasets, documents
//! (from text or uploaded files), indexing status and document segments.
//!
//! Each method issues exactly one HTTP request with the configured bearer key
//! and returns the decoded response. Non-2xx responses become
//! [`Error::BadResponse`] carrying the status code and raw body.
//!
//! ```no_run
//! use dify_knowledge::KnowledgeBaseClient;
//!
//! # async fn run() -> Result<(), dify_knowledge::Error> {
//! let client = KnowledgeBaseClient::from_env()?;
//! let dataset = client.create_dataset("handbook", None).await?;
//! let created = client
//!     .create_document_from_text(&dataset.id, "intro", "Welcome aboard.", None, None)
//!     .await?;
//! let status = client.get_index_status(&dataset.id, &created.batch).await?;
//! println!("{status}");
//! # Ok(())
//! # }
//! ```

pub mod client;
mod de;
pub mod datasets;
pub mod documents;
mod pagination;
pub mod segments;

pub use client::{
    API_KEY_ENV, API_URL_ENV, DEFAULT_BASE_URL, Error, KnowledgeBaseBuilder, KnowledgeBaseClient,
};
pub use datasets::model::{Dataset, Permission};
pub use documents::model::{
    Document, DocumentResponse, DocumentTextUpdate, IndexingTechnique, PreProcessingRule,
    PreProcessingRuleId, ProcessRule, ProcessRules, Segmentation,
};
pub use pagination::Pagination;
pub use segments::model::{Segment, SegmentPayload, SegmentResponse, SegmentsResponse};
