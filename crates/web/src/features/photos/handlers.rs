use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::photo::CreatePhotoRequest, models::Photo};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/contests/{contest_id}/photos",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Photos in upload order, each with its ratings", body = Vec<Photo>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contest not found")
    ),
    tag = "photos"
)]
pub async fn list_photos(
    State(db): State<Database>,
    Path(contest_id): Path<Uuid>,
) -> Result<Json<Vec<Photo>>, WebError> {
    let photos = services::list_photos(db.pool(), contest_id).await?;

    Ok(Json(photos))
}

#[utoipa::path(
    post,
    path = "/api/contests/{contest_id}/photos",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id")
    ),
    request_body = CreatePhotoRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Photo registered", body = Photo),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contest not found"),
        (status = 409, description = "Category does not belong to this contest")
    ),
    tag = "photos"
)]
pub async fn create_photo(
    State(db): State<Database>,
    Path(contest_id): Path<Uuid>,
    Json(req): Json<CreatePhotoRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let photo = services::create_photo(db.pool(), contest_id, &req).await?;

    Ok((StatusCode::CREATED, Json(photo)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/contests/{contest_id}/photos/{photo_id}",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id"),
        ("photo_id" = Uuid, Path, description = "Photo id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Photo and its ratings deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Photo not found")
    ),
    tag = "photos"
)]
pub async fn delete_photo(
    State(db): State<Database>,
    Path((contest_id, photo_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    services::delete_photo(db.pool(), contest_id, photo_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
