use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::header,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        ranking::{ExportQuery, RankingEntry, RankingQuery},
    },
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/rankings/{contest_id}",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id"),
        RankingQuery
    ),
    responses(
        (status = 200, description = "Ranking retrieved successfully", body = PaginatedResponse<RankingEntry>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Contest not found"),
        (status = 409, description = "Contest is not closed yet")
    ),
    tag = "rankings"
)]
pub async fn get_contest_ranking(
    State(db): State<Database>,
    Path(contest_id): Path<Uuid>,
    query: Result<Query<RankingQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    query.validate().map_err(WebError::BadRequest)?;

    let (_, entries) = services::get_contest_ranking(db.pool(), contest_id, query.category).await?;

    let response = PaginatedResponse::from_items(entries, &query.pagination());

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/rankings/{contest_id}/export",
    params(
        ("contest_id" = Uuid, Path, description = "Contest id"),
        ExportQuery
    ),
    responses(
        (status = 200, description = "Ranking as CSV", body = String, content_type = "text/csv"),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Contest not found"),
        (status = 409, description = "Contest is not closed yet")
    ),
    tag = "rankings"
)]
pub async fn export_contest_ranking(
    State(db): State<Database>,
    Path(contest_id): Path<Uuid>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(query) = query?;
    let (file_name, csv) =
        services::export_contest_ranking(db.pool(), contest_id, query.category).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        csv,
    )
        .into_response())
}
