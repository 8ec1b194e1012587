//! Document endpoints: creation from text or files, updates, listing,
//! deletion and indexing progress.

pub mod model;
mod upload;

use std::path::Path;

use serde_json::Value;
use tracing::instrument;

use crate::{
    client::{Error, KnowledgeBaseClient},
    pagination::{DataEnvelope, Pagination},
};
use model::{
    CreateByTextRequest, Document, DocumentResponse, DocumentTextUpdate, IndexingTechnique,
    ProcessRule, UploadData,
};

impl KnowledgeBaseClient {
    /// Creates a document from raw text.
    ///
    /// `indexing_technique` defaults to [`IndexingTechnique::HighQuality`] and
    /// `process_rule` to [`ProcessRule::Automatic`].
    #[instrument(skip_all, fields(
        dataset.id = dataset_id,
        document.name = name,
        text.len = text.len(),
        indexing.technique = ?indexing_technique,
        process_rule.present = process_rule.is_some(),
    ), err)]
    pub async fn create_document_from_text(
        &self,
        dataset_id: &str,
        name: &str,
        text: &str,
        indexing_technique: Option<IndexingTechnique>,
        process_rule: Option<ProcessRule>,
    ) -> Result<DocumentResponse, Error> {
        let url = self.endpoint(&["datasets", dataset_id, "document", "create_by_text"])?;
        let process_rule = process_rule.unwrap_or_default();
        let request = CreateByTextRequest {
            name,
            text,
            indexing_technique: indexing_technique.unwrap_or_default(),
            process_rule: &process_rule,
        };
        self.post_json(url, &request).await
    }

    /// Creates a document by uploading a file.
    ///
    /// `original_document_id` is only sent when given. The file is opened right
    /// before the request and closed when it completes; a missing or unreadable
    /// file fails with [`Error::OpenFile`] without contacting the server.
    #[instrument(skip_all, fields(
        dataset.id = dataset_id,
        file.path = %file_path.as_ref().display(),
        indexing.technique = ?indexing_technique,
        original_document.id = original_document_id,
    ), err)]
    pub async fn create_document_from_file(
        &self,
        dataset_id: &str,
        file_path: impl AsRef<Path>,
        process_rule: Option<ProcessRule>,
        original_document_id: Option<&str>,
        indexing_technique: Option<IndexingTechnique>,
    ) -> Result<DocumentResponse, Error> {
        let url = self.endpoint(&["datasets", dataset_id, "document", "create_by_file"])?;
        let process_rule = process_rule.unwrap_or_default();
        let data = UploadData {
            name: None,
            indexing_technique: Some(indexing_technique.unwrap_or_default()),
            process_rule: &process_rule,
            original_document_id,
        };
        let form = upload::upload_form(&data, file_path.as_ref()).await?;
        self.post_multipart(url, form).await
    }

    /// Updates a document's name, text or process rule. Only fields set on
    /// `update` are sent; an empty update posts `{}`.
    #[instrument(skip_all, fields(
        dataset.id = dataset_id,
        document.id = document_id,
        update.name = update.name.is_some(),
        update.text = update.text.is_some(),
        update.process_rule = update.process_rule.is_some(),
    ), err)]
    pub async fn update_document_via_text(
        &self,
        dataset_id: &str,
        document_id: &str,
        update: &DocumentTextUpdate,
    ) -> Result<DocumentResponse, Error> {
        let url =
            self.endpoint(&["datasets", dataset_id, "documents", document_id, "update_by_text"])?;
        self.post_json(url, update).await
    }

    /// Replaces a document's content with an uploaded file.
    ///
    /// `name` is only sent when given; `process_rule` defaults to
    /// [`ProcessRule::Automatic`].
    #[instrument(skip_all, fields(
        dataset.id = dataset_id,
        document.id = document_id,
        file.path = %file_path.as_ref().display(),
        document.name = name,
    ), err)]
    pub async fn update_document_from_file(
        &self,
        dataset_id: &str,
        document_id: &str,
        file_path: impl AsRef<Path>,
        name: Option<&str>,
        process_rule: Option<ProcessRule>,
    ) -> Result<DocumentResponse, Error> {
        let url =
            self.endpoint(&["datasets", dataset_id, "documents", document_id, "update_by_file"])?;
        let process_rule = process_rule.unwrap_or_default();
        let data = UploadData {
            name,
            indexing_technique: None,
            process_rule: &process_rule,
            original_document_id: None,
        };
        let form = upload::upload_form(&data, file_path.as_ref()).await?;
        self.post_multipart(url, form).await
    }

    #[instrument(skip_all, fields(dataset.id = dataset_id, document.id = document_id), err)]
    pub async fn delete_document(&self, dataset_id: &str, document_id: &str) -> Result<(), Error> {
        let url = self.endpoint(&["datasets", dataset_id, "documents", document_id])?;
        self.delete(url).await
    }

    /// Lists one page of a dataset's documents.
    #[instrument(skip_all, fields(
        dataset.id = dataset_id,
        page = pagination.page,
        limit = pagination.limit,
    ), err)]
    pub async fn list_documents(
        &self,
        dataset_id: &str,
        pagination: Pagination,
    ) -> Result<Vec<Document>, Error> {
        let mut url = self.endpoint(&["datasets", dataset_id, "documents"])?;
        pagination.apply(&mut url);

        let envelope: DataEnvelope<Document> = self.get_json(url).await?;
        let documents = envelope.into_items();
        tracing::debug!(documents.count = documents.len(), "documents listed");
        Ok(documents)
    }

    /// Fetches indexing progress for the documents of one batch.
    ///
    /// The response is returned as-is; its shape is defined by the server.
    #[instrument(skip_all, fields(dataset.id = dataset_id, batch = batch), err)]
    pub async fn get_index_status(&self, dataset_id: &str, batch: &str) -> Result<Value, Error> {
        let url =
            self.endpoint(&["datasets", dataset_id, "documents", batch, "indexing-status"])?;
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::model::*;
    use serde_json::json;

    #[test]
    fn automatic_rule_serializes_as_mode() {
        assert_eq!(serde_json::to_value(ProcessRule::Automatic).unwrap(), json!({"mode": "automatic"}));
    }

    #[test]
    fn custom_rule_carries_rules() {
        let rule = ProcessRule::from(
            ProcessRules::new(Segmentation::new("###", 500))
                .with_pre_processing(PreProcessingRuleId::RemoveExtraSpaces, true)
                .with_pre_processing(PreProcessingRuleId::RemoveUrlsEmails, false),
        );
        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({
                "mode": "custom",
                "rules": {
                    "pre_processing_rules": [
                        {"id": "remove_extra_spaces", "enabled": true},
                        {"id": "remove_urls_emails", "enabled": false}
                    ],
                    "segmentation": {"separator": "###", "max_tokens": 500}
                }
            })
        );
    }

    #[test]
    fn raw_rule_is_sent_unchanged() {
        let raw = json!({"mode": "hierarchical", "rules": {"parent_mode": "paragraph"}});
        assert_eq!(serde_json::to_value(ProcessRule::from(raw.clone())).unwrap(), raw);
    }

    #[test]
    fn create_by_text_body() {
        let rule = ProcessRule::default();
        let request = CreateByTextRequest {
            name: "intro",
            text: "hello",
            indexing_technique: IndexingTechnique::default(),
            process_rule: &rule,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "intro",
                "text": "hello",
                "indexing_technique": "high_quality",
                "process_rule": {"mode": "automatic"}
            })
        );
    }

    #[test]
    fn upload_data_omits_absent_fields() {
        let rule = ProcessRule::Automatic;
        let data = UploadData {
            name: None,
            indexing_technique: Some(IndexingTechnique::Economy),
            process_rule: &rule,
            original_document_id: None,
        };
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"indexing_technique":"economy","process_rule":{"mode":"automatic"}}"#
        );

        let data = UploadData { original_document_id: Some("doc-0"), ..data };
        assert_eq!(serde_json::to_value(&data).unwrap()["original_document_id"], "doc-0");
    }

    #[test]
    fn empty_text_update_is_empty_object() {
        assert_eq!(serde_json::to_value(DocumentTextUpdate::new()).unwrap(), json!({}));
    }

    #[test]
    fn empty_strings_are_sent() {
        let update = DocumentTextUpdate::new().with_name("").with_text("");
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"name": "", "text": ""}));
    }
}
