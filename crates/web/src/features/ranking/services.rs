use sqlx::PgPool;
use storage::{
    dto::ranking::RankingEntry,
    models::Contest,
    repository::{category::CategoryRepository, contest::ContestRepository, photo::PhotoRepository},
    services::{CategoryFilter, compute_ranking, export},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// Rankings are published once a contest is closed, never while it runs.
pub fn ensure_ranking_published(contest: &Contest) -> WebResult<()> {
    if contest.status.publishes_ranking() {
        Ok(())
    } else {
        Err(WebError::Conflict(format!(
            "Contest is {}; the ranking is only available once it is closed",
            contest.status
        )))
    }
}

/// Full ranking of a closed contest, best photo first
pub async fn get_contest_ranking(
    pool: &PgPool,
    contest_id: Uuid,
    filter: CategoryFilter,
) -> WebResult<(Contest, Vec<RankingEntry>)> {
    let contest = ContestRepository::new(pool).find_by_id(contest_id).await?;
    ensure_ranking_published(&contest)?;

    let categories = CategoryRepository::new(pool);
    let photos = PhotoRepository::new(pool);
    let (categories, photos) = tokio::try_join!(
        categories.list_for_contest(contest_id),
        photos.list_with_ratings(contest_id)
    )?;

    let ranked = compute_ranking(photos, filter);
    tracing::debug!(
        "Ranked {} photos of contest {} (category: {})",
        ranked.len(),
        contest_id,
        filter
    );

    Ok((contest, RankingEntry::from_ranking(ranked, &categories)))
}

/// The ranking as CSV, along with a download file name
pub async fn export_contest_ranking(
    pool: &PgPool,
    contest_id: Uuid,
    filter: CategoryFilter,
) -> WebResult<(String, String)> {
    let (contest, entries) = get_contest_ranking(pool, contest_id, filter).await?;

    Ok((export_file_name(&contest.name), export::ranking_csv(&entries)))
}

fn export_file_name(contest_name: &str) -> String {
    let stem: String = contest_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!("ranking_{}.csv", stem)
}
