use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::de::null_as_default;

/// Who may see and use a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    OnlyMe,
    #[default]
    AllTeamMembers,
    PartialMembers,
}

/// A knowledge base as returned by the API.
///
/// Fields the client does not model are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Kept as text since the server may report permissions this client has no variant for.
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub data_source_type: Option<String>,
    #[serde(default)]
    pub indexing_technique: Option<String>,
    #[serde(default)]
    pub app_count: Option<u64>,
    #[serde(default)]
    pub document_count: Option<u64>,
    #[serde(default)]
    pub word_count: Option<u64>,
    #[serde(default)]
    pub created_by: Option<String>,
    /// Unix timestamp, seconds.
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateDatasetRequest<'a> {
    pub name: &'a str,
    pub permission: Permission,
}
