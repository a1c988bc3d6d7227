use super::models::*;
use crate::{ImporterError, Result};
use chrono::{Duration, NaiveDateTime};
use sqlx::PgPool;
use std::collections::HashMap;
use storage::models::{
    Category, Contest, ContestStatus, CriterionScores, Photo, Rating, Score, UpsertOutcome,
    upsert_rating,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Namespace for ids derived from legacy document ids. Re-importing the same
/// snapshot yields the same ids.
const LEGACY_NAMESPACE: Uuid = Uuid::from_u128(0x6d1f_2a7c_9b44_4e0b_a3f5_8c2e_71d9_04b6);

/// A snapshot converted to domain values, ready to rank or store
#[derive(Debug, Clone)]
pub struct ImportedContest {
    pub contest: Contest,
    pub voters: Vec<String>,
    pub categories: Vec<Category>,
    /// Photos in snapshot order, ratings attached
    pub photos: Vec<Photo>,
    category_ids: HashMap<String, Uuid>,
}

impl ImportedContest {
    /// Id assigned to the category known as `legacy_id` in the snapshot
    pub fn category_id(&self, legacy_id: &str) -> Option<Uuid> {
        self.category_ids.get(legacy_id).copied()
    }

    pub fn num_ratings(&self) -> usize {
        self.photos.iter().map(|p| p.ratings.len()).sum()
    }
}

pub struct SnapshotTransformer<'a> {
    pool: &'a PgPool,
}

impl<'a> SnapshotTransformer<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Converts a validated snapshot without touching the database.
    ///
    /// Scores that are not numbers count as 0. Photos and ratings get
    /// increasing `created_at` values so their snapshot order survives a
    /// round trip through storage.
    pub fn convert(snapshot: ContestSnapshot) -> Result<ImportedContest> {
        Self::convert_at(snapshot, chrono::Utc::now().naive_utc())
    }

    fn convert_at(snapshot: ContestSnapshot, imported_at: NaiveDateTime) -> Result<ImportedContest> {
        let ContestSnapshot {
            contest: data,
            categories: category_data,
            photos: photo_data,
        } = snapshot;

        let status: ContestStatus = data
            .status
            .parse()
            .map_err(ImporterError::TransformationError)?;
        let contest_id = Uuid::new_v5(&LEGACY_NAMESPACE, data.id.as_bytes());

        let contest = Contest {
            contest_id,
            name: data.name.trim().to_string(),
            description: non_blank(data.description),
            status,
            owner_id: non_blank(data.owner_id),
            created_at: imported_at,
        };

        let mut voters: Vec<String> = Vec::with_capacity(data.voters.len());
        for voter in data.voters {
            let voter = voter.trim().to_string();
            if !voter.is_empty() && !voters.contains(&voter) {
                voters.push(voter);
            }
        }

        let mut category_ids = HashMap::with_capacity(category_data.len());
        let categories: Vec<Category> = category_data
            .into_iter()
            .map(|c| {
                let category_id = Uuid::new_v5(&contest_id, format!("category:{}", c.id).as_bytes());
                category_ids.insert(c.id, category_id);
                Category {
                    category_id,
                    contest_id,
                    name: c.name.trim().to_string(),
                }
            })
            .collect();

        let mut clock = imported_at;
        let mut photos = Vec::with_capacity(photo_data.len());
        for data in photo_data {
            let category_id = *category_ids.get(&data.category_id).ok_or_else(|| {
                ImporterError::TransformationError(format!(
                    "Photo '{}' references unknown category '{}'",
                    data.id, data.category_id
                ))
            })?;
            let photo_id = Uuid::new_v5(&contest_id, format!("photo:{}", data.id).as_bytes());

            clock += Duration::microseconds(1);
            let mut photo = Photo {
                photo_id,
                contest_id,
                category_id,
                author_name: non_blank(data.author_name),
                url: data.url.trim().to_string(),
                drive_file_id: non_blank(data.drive_file_id),
                created_at: clock,
                ratings: Vec::with_capacity(data.ratings.len()),
            };

            for rating in data.ratings {
                clock += Duration::microseconds(1);
                let rating = convert_rating(photo_id, rating, clock);
                if upsert_rating(&mut photo.ratings, rating) == UpsertOutcome::Replaced {
                    debug!("Photo '{}': kept the last rating of a repeated evaluator", data.id);
                }
            }

            photos.push(photo);
        }

        Ok(ImportedContest {
            contest,
            voters,
            categories,
            photos,
            category_ids,
        })
    }

    /// Writes the contest in one transaction. A contest imported earlier from
    /// the same snapshot is replaced entirely.
    pub async fn import_to_database(&self, imported: &ImportedContest) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let replaced = sqlx::query("DELETE FROM contests WHERE contest_id = $1")
            .bind(imported.contest.contest_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if replaced > 0 {
            warn!(
                "Replacing previously imported contest {}",
                imported.contest.contest_id
            );
        }

        self.insert_contest(&imported.contest, &mut tx).await?;

        for voter in &imported.voters {
            sqlx::query("INSERT INTO contest_voters (contest_id, username) VALUES ($1, $2)")
                .bind(imported.contest.contest_id)
                .bind(voter)
                .execute(&mut *tx)
                .await?;
        }

        for category in &imported.categories {
            sqlx::query("INSERT INTO categories (category_id, contest_id, name) VALUES ($1, $2, $3)")
                .bind(category.category_id)
                .bind(category.contest_id)
                .bind(&category.name)
                .execute(&mut *tx)
                .await?;
        }

        for photo in &imported.photos {
            self.insert_photo(photo, &mut tx).await?;
        }

        tx.commit().await?;

        info!(
            "Imported contest '{}': {} categories, {} photos, {} ratings",
            imported.contest.name,
            imported.categories.len(),
            imported.photos.len(),
            imported.num_ratings()
        );

        Ok(())
    }

    async fn insert_contest(
        &self,
        contest: &Contest,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO contests (contest_id, name, description, status, owner_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(contest.contest_id)
        .bind(&contest.name)
        .bind(&contest.description)
        .bind(contest.status.as_str())
        .bind(&contest.owner_id)
        .bind(contest.created_at)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn insert_photo(
        &self,
        photo: &Photo,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO photos (photo_id, contest_id, category_id, author_name, url, drive_file_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(photo.photo_id)
        .bind(photo.contest_id)
        .bind(photo.category_id)
        .bind(&photo.author_name)
        .bind(&photo.url)
        .bind(&photo.drive_file_id)
        .bind(photo.created_at)
        .execute(&mut **tx)
        .await?;

        for rating in &photo.ratings {
            sqlx::query(
                r#"
                INSERT INTO ratings (rating_id, photo_id, evaluator, scores, comments, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(rating.rating_id)
            .bind(rating.photo_id)
            .bind(&rating.evaluator)
            .bind(sqlx::types::Json(&rating.scores))
            .bind(&rating.comments)
            .bind(rating.created_at)
            .bind(rating.updated_at)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}

fn convert_rating(photo_id: Uuid, data: RatingData, at: NaiveDateTime) -> Rating {
    let evaluator = data.evaluator.trim().to_string();
    let scores: CriterionScores = data
        .scores
        .iter()
        .map(|(criterion, value)| {
            (
                criterion.as_str(),
                Score::from_legacy(value).unwrap_or_default(),
            )
        })
        .collect();

    Rating {
        rating_id: Uuid::new_v5(&photo_id, evaluator.as_bytes()),
        photo_id,
        evaluator,
        scores,
        comments: non_blank(data.comments),
        created_at: at,
        updated_at: at,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
