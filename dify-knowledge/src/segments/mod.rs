//! Segment endpoints for the chunks of a single document.

pub mod model;

use tracing::instrument;

use crate::client::{Error, KnowledgeBaseClient};
use model::{AddSegmentsRequest, SegmentPayload, SegmentResponse, SegmentsResponse, UpdateSegmentRequest};

impl KnowledgeBaseClient {
    /// Adds segments to a document.
    #[instrument(skip_all, fields(
        dataset.id = dataset_id,
        document.id = document_id,
        segments.count = segments.len(),
    ), err)]
    pub async fn add_segments(
        &self,
        dataset_id: &str,
        document_id: &str,
        segments: &[SegmentPayload],
    ) -> Result<SegmentsResponse, Error> {
        let url = self.endpoint(&["datasets", dataset_id, "documents", document_id, "segments"])?;
        self.post_json(url, &AddSegmentsRequest { segments }).await
    }

    /// Lists a document's segments, optionally filtered by `keyword` and `status`.
    /// Filters are only sent when given.
    #[instrument(skip_all, fields(
        dataset.id = dataset_id,
        document.id = document_id,
        keyword = keyword,
        status = status,
    ), err)]
    pub async fn list_segments(
        &self,
        dataset_id: &str,
        document_id: &str,
        keyword: Option<&str>,
        status: Option<&str>,
    ) -> Result<SegmentsResponse, Error> {
        let mut url =
            self.endpoint(&["datasets", dataset_id, "documents", document_id, "segments"])?;

        if let Some(keyword) = keyword {
            url.query_pairs_mut().append_pair("keyword", keyword);
        }
        if let Some(status) = status {
            url.query_pairs_mut().append_pair("status", status);
        }

        self.get_json(url).await
    }

    #[instrument(skip_all, fields(
        dataset.id = dataset_id,
        document.id = document_id,
        segment.id = segment_id,
    ), err)]
    pub async fn delete_segment(
        &self,
        dataset_id: &str,
        document_id: &str,
        segment_id: &str,
    ) -> Result<(), Error> {
        let url = self.endpoint(&[
            "datasets",
            dataset_id,
            "documents",
            document_id,
            "segments",
            segment_id,
        ])?;
        self.delete(url).await
    }

    /// Replaces a segment's content. `answer` and `keywords` are only sent when set.
    #[instrument(skip_all, fields(
        dataset.id = dataset_id,
        document.id = document_id,
        segment.id = segment_id,
        segment.enabled = segment.enabled,
    ), err)]
    pub async fn update_segment(
        &self,
        dataset_id: &str,
        document_id: &str,
        segment_id: &str,
        segment: &SegmentPayload,
    ) -> Result<SegmentResponse, Error> {
        let url = self.endpoint(&[
            "datasets",
            dataset_id,
            "documents",
            document_id,
            "segments",
            segment_id,
        ])?;
        self.post_json(url, &UpdateSegmentRequest { segment }).await
    }
}
