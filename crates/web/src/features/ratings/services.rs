use sqlx::PgPool;
use storage::{
    dto::rating::SubmitRatingRequest,
    models::{Contest, Rating, UpsertOutcome},
    repository::{contest::ContestRepository, photo::PhotoRepository, rating::RatingRepository},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// A rating is accepted only while the contest is open and only from one of
/// its allowlisted evaluators.
pub fn ensure_rating_allowed(contest: &Contest, evaluator: &str, is_voter: bool) -> WebResult<()> {
    if !contest.status.accepts_ratings() {
        return Err(WebError::Conflict(format!(
            "Contest is {}; ratings are only accepted while it is open",
            contest.status
        )));
    }

    if !is_voter {
        return Err(WebError::Forbidden(format!(
            "{} is not an evaluator of this contest",
            evaluator
        )));
    }

    Ok(())
}

pub async fn submit_rating(
    pool: &PgPool,
    contest_id: Uuid,
    photo_id: Uuid,
    req: &SubmitRatingRequest,
) -> WebResult<(Rating, UpsertOutcome)> {
    let contests = ContestRepository::new(pool);
    let contest = contests.find_by_id(contest_id).await?;
    let is_voter = contests.is_voter(contest_id, &req.evaluator).await?;
    ensure_rating_allowed(&contest, &req.evaluator, is_voter)?;

    PhotoRepository::new(pool)
        .find_by_id(contest_id, photo_id)
        .await?;

    let (rating, outcome) = RatingRepository::new(pool).upsert(photo_id, req).await?;

    tracing::info!(
        "{:?} rating of photo {} by {} ({} criteria)",
        outcome,
        photo_id,
        req.evaluator,
        rating.scores.len()
    );

    Ok((rating, outcome))
}

pub async fn list_ratings(pool: &PgPool, contest_id: Uuid, photo_id: Uuid) -> WebResult<Vec<Rating>> {
    PhotoRepository::new(pool)
        .find_by_id(contest_id, photo_id)
        .await?;

    let ratings = RatingRepository::new(pool).list_for_photo(photo_id).await?;

    Ok(ratings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::models::ContestStatus;

    fn contest(status: ContestStatus) -> Contest {
        Contest {
            contest_id: Uuid::new_v4(),
            name: "Olhares da Cidade".to_string(),
            description: None,
            status,
            owner_id: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_open_contest_accepts_its_voters() {
        assert!(ensure_rating_allowed(&contest(ContestStatus::Open), "jurado1", true).is_ok());
    }

    #[test]
    fn test_non_voter_is_forbidden() {
        let result = ensure_rating_allowed(&contest(ContestStatus::Open), "intruso", false);
        assert!(matches!(result, Err(WebError::Forbidden(_))));
    }

    #[test]
    fn test_draft_and_closed_contests_reject_ratings() {
        for status in [ContestStatus::Draft, ContestStatus::Closed] {
            let result = ensure_rating_allowed(&contest(status), "jurado1", true);
            assert!(matches!(result, Err(WebError::Conflict(_))));
        }
    }
}
