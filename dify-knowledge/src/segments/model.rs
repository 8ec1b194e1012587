use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::de::null_as_default;

/// Segment content sent when adding or updating segments.
///
/// `answer` and `keywords` are omitted from the request unless set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentPayload {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    pub enabled: bool,
}

impl SegmentPayload {
    /// An enabled segment with the given content.
    pub fn new<S: Into<String>>(content: S) -> Self {
        Self { content: content.into(), answer: None, keywords: None, enabled: true }
    }

    pub fn with_answer<S: Into<String>>(mut self, answer: S) -> Self {
        self.answer = Some(answer.into());
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// A segment as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub word_count: Option<u64>,
    #[serde(default)]
    pub tokens: Option<u64>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub index_node_id: Option<String>,
    #[serde(default)]
    pub index_node_hash: Option<String>,
    #[serde(default)]
    pub hit_count: Option<u64>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    /// Unix timestamp, seconds.
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub indexing_at: Option<i64>,
    #[serde(default)]
    pub completed_at: Option<i64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the add and list segment endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Segment>,
    #[serde(default)]
    pub doc_form: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the segment update endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentResponse {
    pub data: Segment,
    #[serde(default)]
    pub doc_form: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddSegmentsRequest<'a> {
    pub segments: &'a [SegmentPayload],
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateSegmentRequest<'a> {
    pub segment: &'a SegmentPayload,
}
