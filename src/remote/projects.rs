use super::{
    resource_id,
    types::{Project, ProjectDraft, Receipt},
    ApiClient, ApiError,
};
use crate::session::Credential;
use reqwest::Method;
use tracing::instrument;

impl ApiClient {
    /// # Errors
    /// Returns an error if the request fails or the response cannot be decoded.
    #[instrument(skip_all)]
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_data(&["api", "projects"], None).await
    }

    /// # Errors
    /// Returns an error if the id is blank, the request fails, or the project does not exist.
    #[instrument(skip(self))]
    pub async fn get_project(&self, id: &str) -> Result<Project, ApiError> {
        let id = resource_id(id, "Project")?;
        self.get_data(&["api", "projects", id], None).await
    }

    /// # Errors
    /// Returns an error if the request fails.
    #[instrument(skip_all)]
    pub async fn create_project(
        &self,
        credential: &Credential,
        draft: &ProjectDraft,
    ) -> Result<Receipt, ApiError> {
        self.write_json(Method::POST, &["api", "projects"], draft, credential)
            .await
    }

    /// # Errors
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self, credential))]
    pub async fn delete_project(
        &self,
        credential: &Credential,
        id: &str,
    ) -> Result<Receipt, ApiError> {
        let id = resource_id(id, "Project")?;
        self.write_empty(Method::DELETE, &["api", "projects", id], credential)
            .await
    }
}
