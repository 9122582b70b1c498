use super::{required_id, ConfirmQuery};
use crate::{
    api::{
        guard::AuthSession,
        handlers::response::{mutation_response, ErrorBody, MutationResponse, ReadError},
        state::AppState,
    },
    content::views::BlogTable,
    mutation::{BlogForm, ConfirmPolicy, FormConfirmation, Mutation, MutationKind},
    remote::{ApiClient, ApiError, Blog},
    session::Credential,
};
use axum::{
    extract::{Extension, Path, Query, State},
    response::{Json, Response},
};
use serde::Deserialize;
use utoipa::ToSchema;

/// Publish toggle body: the flag as the dashboard currently shows it.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishToggle {
    pub published: bool,
}

fn resource(id: &str) -> String {
    format!("blog:{id}")
}

async fn table(client: &ApiClient, credential: &Credential) -> Result<BlogTable, ApiError> {
    let blogs = client.list_admin_blogs(credential).await?;
    Ok(BlogTable::from(&blogs[..]))
}

#[utoipa::path(
    get,
    path = "/dashboard/blogs",
    responses(
        (status = 200, description = "All blogs, drafts included", body = BlogTable),
        (status = 303, description = "No valid session; redirect to /login")
    ),
    tag = "dashboard"
)]
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> Result<Json<BlogTable>, ReadError> {
    Ok(Json(table(state.client(), &auth.credential).await?))
}

#[utoipa::path(
    get,
    path = "/dashboard/blogs/{id}",
    params(("id" = String, Path, description = "Blog id")),
    responses(
        (status = 200, description = "One blog", body = Blog),
        (status = 404, description = "No such blog", body = ErrorBody)
    ),
    tag = "dashboard"
)]
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
) -> Result<Json<Blog>, ReadError> {
    Ok(Json(
        state.client().get_blog(&id, Some(&auth.credential)).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/dashboard/blogs",
    request_body = BlogForm,
    responses(
        (status = 200, description = "Created; refreshed blog list", body = MutationResponse<BlogTable>),
        (status = 422, description = "Validation failed", body = MutationResponse<BlogTable>),
        (status = 409, description = "Another change is in flight", body = MutationResponse<BlogTable>)
    ),
    tag = "dashboard"
)]
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Json(form): Json<BlogForm>,
) -> Response {
    let client = state.client();
    let credential = &auth.credential;
    let mutation = Mutation::new(MutationKind::CreateBlog, "blog:new", "Create blog");

    let report = state
        .workflow(&auth.identity, FormConfirmation::default())
        .submit(
            &mutation,
            &form,
            |draft| async move { client.create_blog(credential, &draft).await },
            || table(client, credential),
        )
        .await;
    mutation_response(report)
}

#[utoipa::path(
    put,
    path = "/dashboard/blogs/{id}",
    params(("id" = String, Path, description = "Blog id")),
    request_body = BlogForm,
    responses(
        (status = 200, description = "Updated; refreshed blog list", body = MutationResponse<BlogTable>),
        (status = 422, description = "Validation failed", body = MutationResponse<BlogTable>)
    ),
    tag = "dashboard"
)]
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
    Json(form): Json<BlogForm>,
) -> Response {
    let client = state.client();
    let credential = &auth.credential;
    let id = match required_id(&id, "Blog") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let mutation = Mutation::new(MutationKind::UpdateBlog, resource(id), format!("Update blog {id}"));

    let report = state
        .workflow(&auth.identity, FormConfirmation::default())
        .submit(
            &mutation,
            &form,
            |draft| async move { client.update_blog(credential, id, &draft).await },
            || table(client, credential),
        )
        .await;
    mutation_response(report)
}

#[utoipa::path(
    delete,
    path = "/dashboard/blogs/{id}",
    params(("id" = String, Path, description = "Blog id"), ConfirmQuery),
    responses(
        (status = 200, description = "Deleted; refreshed blog list", body = MutationResponse<BlogTable>),
        (status = 428, description = "Not confirmed", body = MutationResponse<BlogTable>),
        (status = 400, description = "Blank id", body = ErrorBody)
    ),
    tag = "dashboard"
)]
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> Response {
    let client = state.client();
    let credential = &auth.credential;
    let id = match required_id(&id, "Blog") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let mutation = Mutation::new(
        MutationKind::DeleteBlog,
        resource(id),
        format!("Delete blog {id}? You won't be able to revert this!"),
    );
    let confirmation = FormConfirmation::from_field(query.confirm.as_deref());

    let report = state
        .workflow(&auth.identity, confirmation)
        .run(
            &mutation,
            || client.delete_blog(credential, id),
            || table(client, credential),
        )
        .await;
    mutation_response(report)
}

#[utoipa::path(
    patch,
    path = "/dashboard/blogs/{id}/publish",
    params(("id" = String, Path, description = "Blog id"), ConfirmQuery),
    request_body = PublishToggle,
    responses(
        (status = 200, description = "Flag flipped; refreshed blog list", body = MutationResponse<BlogTable>),
        (status = 428, description = "Not confirmed", body = MutationResponse<BlogTable>),
        (status = 400, description = "Blank id", body = ErrorBody)
    ),
    tag = "dashboard"
)]
pub async fn toggle_publish(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
    Json(toggle): Json<PublishToggle>,
) -> Response {
    let client = state.client();
    let credential = &auth.credential;
    let id = match required_id(&id, "Blog") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let target = !toggle.published;
    let verb = if target { "Publish" } else { "Unpublish" };
    let policy = if state.confirm_publish() {
        ConfirmPolicy::Always
    } else {
        ConfirmPolicy::Never
    };
    let mutation = Mutation::new(
        MutationKind::toggle_publish(toggle.published),
        resource(id),
        format!("{verb} blog {id}?"),
    )
    .with_confirmation(policy);
    let confirmation = FormConfirmation::from_field(query.confirm.as_deref());

    let report = state
        .workflow(&auth.identity, confirmation)
        .run(
            &mutation,
            || client.set_blog_published(credential, id, target),
            || table(client, credential),
        )
        .await;
    mutation_response(report)
}
