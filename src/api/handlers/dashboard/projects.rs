use super::{required_id, ConfirmQuery};
use crate::{
    api::{
        guard::AuthSession,
        handlers::response::{mutation_response, ErrorBody, MutationResponse, ReadError},
        state::AppState,
    },
    content::views::ProjectGrid,
    mutation::{FormConfirmation, Mutation, MutationKind, ProjectForm},
    remote::{ApiClient, ApiError},
};
use axum::{
    extract::{Extension, Path, Query, State},
    response::{Json, Response},
};

async fn grid(client: &ApiClient) -> Result<ProjectGrid, ApiError> {
    let projects = client.list_projects().await?;
    Ok(ProjectGrid::from(&projects[..]))
}

#[utoipa::path(
    get,
    path = "/dashboard/projects",
    responses(
        (status = 200, description = "All projects", body = ProjectGrid),
        (status = 303, description = "No valid session; redirect to /login")
    ),
    tag = "dashboard"
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<ProjectGrid>, ReadError> {
    Ok(Json(grid(state.client()).await?))
}

#[utoipa::path(
    post,
    path = "/dashboard/projects",
    request_body = ProjectForm,
    responses(
        (status = 200, description = "Created; refreshed project list", body = MutationResponse<ProjectGrid>),
        (status = 422, description = "Validation failed", body = MutationResponse<ProjectGrid>)
    ),
    tag = "dashboard"
)]
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Json(form): Json<ProjectForm>,
) -> Response {
    let client = state.client();
    let credential = &auth.credential;
    let mutation = Mutation::new(MutationKind::CreateProject, "project:new", "Create project");

    let report = state
        .workflow(&auth.identity, FormConfirmation::default())
        .submit(
            &mutation,
            &form,
            |draft| async move { client.create_project(credential, &draft).await },
            || grid(client),
        )
        .await;
    mutation_response(report)
}

#[utoipa::path(
    delete,
    path = "/dashboard/projects/{id}",
    params(("id" = String, Path, description = "Project id"), ConfirmQuery),
    responses(
        (status = 200, description = "Deleted; refreshed project list", body = MutationResponse<ProjectGrid>),
        (status = 428, description = "Not confirmed", body = MutationResponse<ProjectGrid>),
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
    let id = match required_id(&id, "Project") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let mutation = Mutation::new(
        MutationKind::DeleteProject,
        format!("project:{id}"),
        format!("Delete project {id}? This project will be permanently deleted!"),
    );
    let confirmation = FormConfirmation::from_field(query.confirm.as_deref());

    let report = state
        .workflow(&auth.identity, confirmation)
        .run(
            &mutation,
            || client.delete_project(credential, id),
            || grid(client),
        )
        .await;
    mutation_response(report)
}
