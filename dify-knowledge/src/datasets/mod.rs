//! Dataset (knowledge base) endpoints.

pub mod model;

use tracing::instrument;

use crate::{
    client::{Error, KnowledgeBaseClient},
    pagination::{DataEnvelope, Pagination},
};
use model::{CreateDatasetRequest, Dataset, Permission};

impl KnowledgeBaseClient {
    /// Lists one page of datasets visible to the API key.
    #[instrument(skip_all, fields(page = pagination.page, limit = pagination.limit), err)]
    pub async fn list_datasets(&self, pagination: Pagination) -> Result<Vec<Dataset>, Error> {
        let mut url = self.endpoint(&["datasets"])?;
        pagination.apply(&mut url);

        let envelope: DataEnvelope<Dataset> = self.get_json(url).await?;
        let datasets = envelope.into_items();
        tracing::debug!(datasets.count = datasets.len(), "datasets listed");
        Ok(datasets)
    }

    /// Creates an empty dataset. `permission` defaults to [`Permission::AllTeamMembers`].
    #[instrument(skip_all, fields(dataset.name = name, dataset.permission = ?permission), err)]
    pub async fn create_dataset(
        &self,
        name: &str,
        permission: Option<Permission>,
    ) -> Result<Dataset, Error> {
        let url = self.endpoint(&["datasets"])?;
        let request = CreateDatasetRequest { name, permission: permission.unwrap_or_default() };
        self.post_json(url, &request).await
    }

    /// Deletes a dataset and everything in it.
    #[instrument(skip_all, fields(dataset.id = dataset_id), err)]
    pub async fn delete_dataset(&self, dataset_id: &str) -> Result<(), Error> {
        let url = self.endpoint(&["datasets", dataset_id])?;
        self.delete(url).await
    }
}
