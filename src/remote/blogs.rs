use super::{
    resource_id,
    types::{Blog, BlogDraft, PublishRequest, Receipt},
    ApiClient, ApiError,
};
use crate::session::Credential;
use reqwest::Method;
use tracing::instrument;

impl ApiClient {
    /// Every blog, drafts included. Requires a session.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be decoded.
    #[instrument(skip_all)]
    pub async fn list_admin_blogs(&self, credential: &Credential) -> Result<Vec<Blog>, ApiError> {
        self.get_data(&["api", "blogs", "admin", "all"], Some(credential))
            .await
    }

    /// Published blogs only.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be decoded.
    #[instrument(skip_all)]
    pub async fn list_published_blogs(&self) -> Result<Vec<Blog>, ApiError> {
        self.get_data(&["api", "blogs"], None).await
    }

    /// Fetches one blog by id or slug.
    ///
    /// # Errors
    /// Returns an error if the id is blank, the request fails, or the blog does not exist.
    #[instrument(skip(self, credential))]
    pub async fn get_blog(
        &self,
        id_or_slug: &str,
        credential: Option<&Credential>,
    ) -> Result<Blog, ApiError> {
        let id = resource_id(id_or_slug, "Blog")?;
        self.get_data(&["api", "blogs", id], credential).await
    }

    /// # Errors
    /// Returns an error if the request fails.
    #[instrument(skip_all)]
    pub async fn create_blog(
        &self,
        credential: &Credential,
        draft: &BlogDraft,
    ) -> Result<Receipt, ApiError> {
        self.write_json(Method::POST, &["api", "blogs"], draft, credential)
            .await
    }

    /// # Errors
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self, credential, draft))]
    pub async fn update_blog(
        &self,
        credential: &Credential,
        id: &str,
        draft: &BlogDraft,
    ) -> Result<Receipt, ApiError> {
        let id = resource_id(id, "Blog")?;
        self.write_json(Method::PUT, &["api", "blogs", id], draft, credential)
            .await
    }

    /// # Errors
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self, credential))]
    pub async fn delete_blog(&self, credential: &Credential, id: &str) -> Result<Receipt, ApiError> {
        let id = resource_id(id, "Blog")?;
        self.write_empty(Method::DELETE, &["api", "blogs", id], credential)
            .await
    }

    /// Sets the publish flag to `published`. Callers pass the new value, not the current one.
    ///
    /// # Errors
    /// Returns an error if the id is blank or the request fails.
    #[instrument(skip(self, credential))]
    pub async fn set_blog_published(
        &self,
        credential: &Credential,
        id: &str,
        published: bool,
    ) -> Result<Receipt, ApiError> {
        let id = resource_id(id, "Blog")?;
        self.write_json(
            Method::PATCH,
            &["api", "blogs", id, "publish"],
            &PublishRequest { published },
            credential,
        )
        .await
    }
}
