use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::rating::{RatingResponse, SubmitRatingRequest},
    models::{Rating, UpsertOutcome},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    put,
    path = "/api/contests/{contest_id}/photos/{photo_id}/ratings",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id"),
        ("photo_id" = Uuid, Path, description = "Photo id")
    ),
    request_body = SubmitRatingRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "First rating of this photo by the evaluator", body = RatingResponse),
        (status = 200, description = "Evaluator's earlier rating replaced", body = RatingResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Evaluator is not allowed to rate this contest"),
        (status = 404, description = "Contest or photo not found"),
        (status = 409, description = "Contest is not open for ratings")
    ),
    tag = "ratings"
)]
pub async fn submit_rating(
    State(db): State<Database>,
    Path((contest_id, photo_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<SubmitRatingRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let (rating, outcome) = services::submit_rating(db.pool(), contest_id, photo_id, &req).await?;

    let created = outcome == UpsertOutcome::Inserted;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(RatingResponse { rating, created })).into_response())
}

#[utoipa::path(
    get,
    path = "/api/contests/{contest_id}/photos/{photo_id}/ratings",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id"),
        ("photo_id" = Uuid, Path, description = "Photo id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Ratings in submission order", body = Vec<Rating>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Photo not found")
    ),
    tag = "ratings"
)]
pub async fn list_ratings(
    State(db): State<Database>,
    Path((contest_id, photo_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<Rating>>, WebError> {
    let ratings = services::list_ratings(db.pool(), contest_id, photo_id).await?;

    Ok(Json(ratings))
}
