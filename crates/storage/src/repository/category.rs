use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Category;

pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_contest(&self, contest_id: Uuid) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, contest_id, name
            FROM categories
            WHERE contest_id = $1
            ORDER BY name
            "#,
        )
        .bind(contest_id)
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn create(&self, contest_id: Uuid, name: &str) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (contest_id, name)
            VALUES ($1, $2)
            RETURNING category_id, contest_id, name
            "#,
        )
        .bind(contest_id)
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match StorageError::from(e) {
            err if err.is_foreign_key_violation() => StorageError::NotFound,
            err => err,
        })?;

        Ok(category)
    }

    pub async fn rename(&self, contest_id: Uuid, category_id: Uuid, name: &str) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $3
            WHERE contest_id = $1 AND category_id = $2
            RETURNING category_id, contest_id, name
            "#,
        )
        .bind(contest_id)
        .bind(category_id)
        .bind(name)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(category)
    }

    /// Delete a category together with the photos filed under it
    pub async fn delete(&self, contest_id: Uuid, category_id: Uuid) -> Result<()> {
        let result =
            sqlx::query("DELETE FROM categories WHERE contest_id = $1 AND category_id = $2")
                .bind(contest_id)
                .bind(category_id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
