use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::rating::SubmitRatingRequest;
use crate::error::{Result, StorageError};
use crate::models::{Rating, UpsertOutcome};

#[derive(FromRow)]
struct UpsertedRating {
    #[sqlx(flatten)]
    rating: Rating,
    inserted: bool,
}

pub struct RatingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RatingRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_photo(&self, photo_id: Uuid) -> Result<Vec<Rating>> {
        let ratings = sqlx::query_as::<_, Rating>(
            r#"
            SELECT rating_id, photo_id, evaluator, scores, comments, created_at, updated_at
            FROM ratings
            WHERE photo_id = $1
            ORDER BY created_at, rating_id
            "#,
        )
        .bind(photo_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ratings)
    }

    /// Store the evaluator's rating of a photo.
    ///
    /// A second submission by the same evaluator overwrites scores and
    /// comments but keeps `created_at`, so the rating holds its place among
    /// the photo's ratings.
    pub async fn upsert(
        &self,
        photo_id: Uuid,
        req: &SubmitRatingRequest,
    ) -> Result<(Rating, UpsertOutcome)> {
        let row = sqlx::query_as::<_, UpsertedRating>(
            r#"
            INSERT INTO ratings (photo_id, evaluator, scores, comments)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (photo_id, evaluator) DO UPDATE
            SET scores = EXCLUDED.scores,
                comments = EXCLUDED.comments,
                updated_at = NOW()
            RETURNING rating_id, photo_id, evaluator, scores, comments,
                      created_at, updated_at, (xmax = 0) AS inserted
            "#,
        )
        .bind(photo_id)
        .bind(&req.evaluator)
        .bind(Json(&req.scores))
        .bind(&req.comments)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match StorageError::from(e) {
            err if err.is_foreign_key_violation() => StorageError::NotFound,
            err => err,
        })?;

        let outcome = if row.inserted {
            UpsertOutcome::Inserted
        } else {
            UpsertOutcome::Replaced
        };

        Ok((row.rating, outcome))
    }
}
