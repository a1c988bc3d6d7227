use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::contest::{
        AddVoterRequest, ContestListFilter, ContestResponse, CreateContestRequest,
        UpdateContestRequest, UpdateContestStatusRequest, VotersResponse,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/contests",
    params(ContestListFilter),
    responses(
        (status = 200, description = "List contests, newest first", body = Vec<ContestResponse>)
    ),
    tag = "contests"
)]
pub async fn list_contests(
    State(db): State<Database>,
    filter: Result<Query<ContestListFilter>, QueryRejection>,
) -> Result<Json<Vec<ContestResponse>>, WebError> {
    let Query(filter) = filter?;
    let contests = services::list_contests(db.pool(), filter.status).await?;

    let response: Vec<ContestResponse> = contests
        .into_iter()
        .map(ContestResponse::from)
        .collect();

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/contests/{contest_id}",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id")
    ),
    responses(
        (status = 200, description = "Contest found", body = ContestResponse),
        (status = 404, description = "Contest not found")
    ),
    tag = "contests"
)]
pub async fn get_contest(
    State(db): State<Database>,
    Path(contest_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let contest = services::get_contest(db.pool(), contest_id).await?;

    Ok(Json(ContestResponse::from(contest)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/contests",
    request_body = CreateContestRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Contest created as a draft", body = ContestResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "contests"
)]
pub async fn create_contest(
    State(db): State<Database>,
    Json(req): Json<CreateContestRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let contest = services::create_contest(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(ContestResponse::from(contest))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/contests/{contest_id}",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id")
    ),
    request_body = UpdateContestRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Contest updated successfully", body = ContestResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contest not found")
    ),
    tag = "contests"
)]
pub async fn update_contest(
    State(db): State<Database>,
    Path(contest_id): Path<Uuid>,
    Json(update_req): Json<UpdateContestRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_contest(db.pool(), contest_id, &update_req).await?;

    Ok(Json(ContestResponse::from(updated)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/contests/{contest_id}/status",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id")
    ),
    request_body = UpdateContestStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Status changed", body = ContestResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contest not found")
    ),
    tag = "contests"
)]
pub async fn update_contest_status(
    State(db): State<Database>,
    Path(contest_id): Path<Uuid>,
    Json(req): Json<UpdateContestStatusRequest>,
) -> Result<Response, WebError> {
    let updated = services::update_contest_status(db.pool(), contest_id, req.status).await?;

    Ok(Json(ContestResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/contests/{contest_id}",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Contest and all of its data deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contest not found")
    ),
    tag = "contests"
)]
pub async fn delete_contest(
    State(db): State<Database>,
    Path(contest_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_contest(db.pool(), contest_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/contests/{contest_id}/voters",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Evaluators allowed to rate this contest", body = VotersResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contest not found")
    ),
    tag = "contests"
)]
pub async fn list_voters(
    State(db): State<Database>,
    Path(contest_id): Path<Uuid>,
) -> Result<Json<VotersResponse>, WebError> {
    let voters = services::list_voters(db.pool(), contest_id).await?;

    Ok(Json(VotersResponse { contest_id, voters }))
}

#[utoipa::path(
    post,
    path = "/api/contests/{contest_id}/voters",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id")
    ),
    request_body = AddVoterRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Evaluator allowed; returns the updated list", body = VotersResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contest not found")
    ),
    tag = "contests"
)]
pub async fn add_voter(
    State(db): State<Database>,
    Path(contest_id): Path<Uuid>,
    Json(req): Json<AddVoterRequest>,
) -> Result<Json<VotersResponse>, WebError> {
    req.validate()?;

    let voters = services::add_voter(db.pool(), contest_id, &req.username).await?;

    Ok(Json(VotersResponse { contest_id, voters }))
}

#[utoipa::path(
    delete,
    path = "/api/contests/{contest_id}/voters/{username}",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id"),
        ("username" = String, Path, description = "Evaluator username")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Evaluator removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contest or evaluator not found")
    ),
    tag = "contests"
)]
pub async fn remove_voter(
    State(db): State<Database>,
    Path((contest_id, username)): Path<(Uuid, String)>,
) -> Result<Response, WebError> {
    services::remove_voter(db.pool(), contest_id, &username).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/voters/{username}/contests",
    params(
        ("username" = String, Path, description = "Evaluator username")
    ),
    responses(
        (status = 200, description = "Open contests this evaluator can rate", body = Vec<ContestResponse>)
    ),
    tag = "contests"
)]
pub async fn list_open_contests_for_voter(
    State(db): State<Database>,
    Path(username): Path<String>,
) -> Result<Json<Vec<ContestResponse>>, WebError> {
    let contests = services::list_open_contests_for_voter(db.pool(), &username).await?;

    Ok(Json(
        contests.into_iter().map(ContestResponse::from).collect(),
    ))
}
