use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::photo::CreatePhotoRequest;
use crate::error::{Result, StorageError};
use crate::models::{Photo, Rating};

const PHOTO_COLUMNS: &str =
    "photo_id, contest_id, category_id, author_name, url, drive_file_id, created_at";

pub struct PhotoRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PhotoRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All photos of a contest in upload order, each with its ratings in
    /// submission order
    pub async fn list_with_ratings(&self, contest_id: Uuid) -> Result<Vec<Photo>> {
        let mut photos = sqlx::query_as::<_, Photo>(&format!(
            r#"
            SELECT {}
            FROM photos
            WHERE contest_id = $1
            ORDER BY created_at, photo_id
            "#,
            PHOTO_COLUMNS
        ))
        .bind(contest_id)
        .fetch_all(self.pool)
        .await?;

        let ratings = sqlx::query_as::<_, Rating>(
            r#"
            SELECT r.rating_id, r.photo_id, r.evaluator, r.scores, r.comments,
                   r.created_at, r.updated_at
            FROM ratings r
            INNER JOIN photos p ON p.photo_id = r.photo_id
            WHERE p.contest_id = $1
            ORDER BY r.created_at, r.rating_id
            "#,
        )
        .bind(contest_id)
        .fetch_all(self.pool)
        .await?;

        let mut by_photo: HashMap<Uuid, Vec<Rating>> = HashMap::new();
        for rating in ratings {
            by_photo.entry(rating.photo_id).or_default().push(rating);
        }

        for photo in &mut photos {
            photo.ratings = by_photo.remove(&photo.photo_id).unwrap_or_default();
        }

        Ok(photos)
    }

    /// Find a photo of the given contest, without its ratings
    pub async fn find_by_id(&self, contest_id: Uuid, photo_id: Uuid) -> Result<Photo> {
        let photo = sqlx::query_as::<_, Photo>(&format!(
            "SELECT {} FROM photos WHERE contest_id = $1 AND photo_id = $2",
            PHOTO_COLUMNS
        ))
        .bind(contest_id)
        .bind(photo_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(photo)
    }

    pub async fn create(&self, contest_id: Uuid, req: &CreatePhotoRequest) -> Result<Photo> {
        let author_name = req
            .author_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let photo = sqlx::query_as::<_, Photo>(&format!(
            r#"
            INSERT INTO photos (contest_id, category_id, author_name, url, drive_file_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            PHOTO_COLUMNS
        ))
        .bind(contest_id)
        .bind(req.category_id)
        .bind(author_name)
        .bind(&req.url)
        .bind(&req.drive_file_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).on_foreign_key("Category does not belong to this contest")
        })?;

        Ok(photo)
    }

    /// Delete a photo and its ratings. Returns the deleted row so callers can
    /// clean up the hosted file.
    pub async fn delete(&self, contest_id: Uuid, photo_id: Uuid) -> Result<Photo> {
        let photo = sqlx::query_as::<_, Photo>(&format!(
            "DELETE FROM photos WHERE contest_id = $1 AND photo_id = $2 RETURNING {}",
            PHOTO_COLUMNS
        ))
        .bind(contest_id)
        .bind(photo_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(photo)
    }
}
