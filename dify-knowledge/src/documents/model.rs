use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::de::null_as_default;

/// Quality/cost tier used to embed a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexingTechnique {
    #[default]
    HighQuality,
    Economy,
}

/// How raw content is cleaned and split into segments during indexing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ProcessRule {
    /// Let the server pick cleaning and segmentation. Sent as `{"mode": "automatic"}`.
    #[default]
    Automatic,
    /// Explicit cleaning and segmentation rules. Sent as `{"mode": "custom", "rules": ...}`.
    Custom(ProcessRules),
    /// Any other rule object, sent unchanged.
    Raw(Value),
}

#[derive(Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
enum TaggedRule<'a> {
    Automatic,
    Custom { rules: &'a ProcessRules },
}

impl Serialize for ProcessRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProcessRule::Automatic => TaggedRule::Automatic.serialize(serializer),
            ProcessRule::Custom(rules) => TaggedRule::Custom { rules }.serialize(serializer),
            ProcessRule::Raw(value) => value.serialize(serializer),
        }
    }
}

impl From<ProcessRules> for ProcessRule {
    fn from(rules: ProcessRules) -> Self {
        ProcessRule::Custom(rules)
    }
}

impl From<Value> for ProcessRule {
    fn from(value: Value) -> Self {
        ProcessRule::Raw(value)
    }
}

/// Rules for [`ProcessRule::Custom`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRules {
    pub pre_processing_rules: Vec<PreProcessingRule>,
    pub segmentation: Segmentation,
}

impl ProcessRules {
    pub fn new(segmentation: Segmentation) -> Self {
        Self { pre_processing_rules: Vec::new(), segmentation }
    }

    /// Adds a cleaning step, switched on or off.
    pub fn with_pre_processing(mut self, id: PreProcessingRuleId, enabled: bool) -> Self {
        self.pre_processing_rules.push(PreProcessingRule { id, enabled });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreProcessingRule {
    pub id: PreProcessingRuleId,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreProcessingRuleId {
    RemoveExtraSpaces,
    RemoveUrlsEmails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segmentation {
    pub separator: String,
    pub max_tokens: u32,
}

impl Segmentation {
    pub fn new<S: Into<String>>(separator: S, max_tokens: u32) -> Self {
        Self { separator: separator.into(), max_tokens }
    }
}

/// Partial update for [`update_document_via_text`](crate::KnowledgeBaseClient::update_document_via_text).
///
/// Only fields set to `Some` are sent. `Some("")` is sent as an empty string,
/// not dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentTextUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_rule: Option<ProcessRule>,
}

impl DocumentTextUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_process_rule<R: Into<ProcessRule>>(mut self, rule: R) -> Self {
        self.process_rule = Some(rule.into());
        self
    }
}

/// A document as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub data_source_type: Option<String>,
    #[serde(default)]
    pub dataset_process_rule_id: Option<String>,
    #[serde(default)]
    pub created_from: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    /// Unix timestamp, seconds.
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub tokens: Option<u64>,
    #[serde(default)]
    pub indexing_status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(default)]
    pub display_status: Option<String>,
    #[serde(default)]
    pub word_count: Option<u64>,
    #[serde(default)]
    pub hit_count: Option<u64>,
    #[serde(default)]
    pub doc_form: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the document create and update endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub document: Document,
    /// Batch id to poll with [`get_index_status`](crate::KnowledgeBaseClient::get_index_status).
    #[serde(default, deserialize_with = "null_as_default")]
    pub batch: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateByTextRequest<'a> {
    pub name: &'a str,
    pub text: &'a str,
    pub indexing_technique: IndexingTechnique,
    pub process_rule: &'a ProcessRule,
}

/// Content of the `data` part of file uploads.
#[derive(Debug, Serialize)]
pub(crate) struct UploadData<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexing_technique: Option<IndexingTechnique>,
    pub process_rule: &'a ProcessRule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_document_id: Option<&'a str>,
}
