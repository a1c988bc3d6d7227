use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::category::{CreateCategoryRequest, RenameCategoryRequest},
    models::Category,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/contests/{contest_id}/categories",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id")
    ),
    responses(
        (status = 200, description = "Categories of the contest", body = Vec<Category>),
        (status = 404, description = "Contest not found")
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(db): State<Database>,
    Path(contest_id): Path<Uuid>,
) -> Result<Json<Vec<Category>>, WebError> {
    let categories = services::list_categories(db.pool(), contest_id).await?;

    Ok(Json(categories))
}

#[utoipa::path(
    post,
    path = "/api/contests/{contest_id}/categories",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id")
    ),
    request_body = CreateCategoryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contest not found")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(db): State<Database>,
    Path(contest_id): Path<Uuid>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let category = services::create_category(db.pool(), contest_id, &req.name).await?;

    Ok((StatusCode::CREATED, Json(category)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/contests/{contest_id}/categories/{category_id}",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id"),
        ("category_id" = Uuid, Path, description = "Category id")
    ),
    request_body = RenameCategoryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Category renamed", body = Category),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn rename_category(
    State(db): State<Database>,
    Path((contest_id, category_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<RenameCategoryRequest>,
) -> Result<Json<Category>, WebError> {
    req.validate()?;

    let category = services::rename_category(db.pool(), contest_id, category_id, &req.name).await?;

    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/contests/{contest_id}/categories/{category_id}",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id"),
        ("category_id" = Uuid, Path, description = "Category id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Category and its photos deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(db): State<Database>,
    Path((contest_id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    services::delete_category(db.pool(), contest_id, category_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
