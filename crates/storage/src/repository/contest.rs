use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::contest::{CreateContestRequest, UpdateContestRequest};
use crate::error::{Result, StorageError};
use crate::models::{Contest, ContestStatus};

const CONTEST_COLUMNS: &str = "contest_id, name, description, status, owner_id, created_at";

/// Repository for contests and their evaluator allowlists
pub struct ContestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContestRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List contests, newest first, optionally restricted to one status
    pub async fn list(&self, status: Option<ContestStatus>) -> Result<Vec<Contest>> {
        let mut query = QueryBuilder::new("SELECT ");
        query.push(CONTEST_COLUMNS);
        query.push(" FROM contests WHERE 1=1");

        if let Some(status) = status {
            query.push(" AND status = ");
            query.push_bind(status.as_str());
        }

        query.push(" ORDER BY created_at DESC");

        let contests = query.build_query_as::<Contest>().fetch_all(self.pool).await?;

        Ok(contests)
    }

    pub async fn find_by_id(&self, contest_id: Uuid) -> Result<Contest> {
        let contest = sqlx::query_as::<_, Contest>(&format!(
            "SELECT {} FROM contests WHERE contest_id = $1",
            CONTEST_COLUMNS
        ))
        .bind(contest_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(contest)
    }

    pub async fn create(&self, req: &CreateContestRequest) -> Result<Contest> {
        let contest = sqlx::query_as::<_, Contest>(&format!(
            r#"
            INSERT INTO contests (name, description, owner_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            CONTEST_COLUMNS
        ))
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.owner_id)
        .bind(ContestStatus::Draft.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(contest)
    }

    /// Update name and/or description; absent fields are left untouched
    pub async fn update_details(
        &self,
        contest_id: Uuid,
        req: &UpdateContestRequest,
    ) -> Result<Contest> {
        let contest = sqlx::query_as::<_, Contest>(&format!(
            r#"
            UPDATE contests
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
            WHERE contest_id = $1
            RETURNING {}
            "#,
            CONTEST_COLUMNS
        ))
        .bind(contest_id)
        .bind(&req.name)
        .bind(&req.description)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(contest)
    }

    pub async fn update_status(&self, contest_id: Uuid, status: ContestStatus) -> Result<Contest> {
        let contest = sqlx::query_as::<_, Contest>(&format!(
            "UPDATE contests SET status = $2 WHERE contest_id = $1 RETURNING {}",
            CONTEST_COLUMNS
        ))
        .bind(contest_id)
        .bind(status.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(contest)
    }

    /// Delete a contest. Categories, photos, ratings and voters go with it.
    pub async fn delete(&self, contest_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM contests WHERE contest_id = $1")
            .bind(contest_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn list_voters(&self, contest_id: Uuid) -> Result<Vec<String>> {
        let voters = sqlx::query_scalar::<_, String>(
            r#"
            SELECT username
            FROM contest_voters
            WHERE contest_id = $1
            ORDER BY added_at, username
            "#,
        )
        .bind(contest_id)
        .fetch_all(self.pool)
        .await?;

        Ok(voters)
    }

    /// Allow `username` to rate the contest. Adding an existing voter is a no-op.
    pub async fn add_voter(&self, contest_id: Uuid, username: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO contest_voters (contest_id, username)
            VALUES ($1, $2)
            ON CONFLICT (contest_id, username) DO NOTHING
            "#,
        )
        .bind(contest_id)
        .bind(username)
        .execute(self.pool)
        .await
        .map_err(|e| match StorageError::from(e) {
            err if err.is_foreign_key_violation() => StorageError::NotFound,
            err => err,
        })?;

        Ok(())
    }

    pub async fn remove_voter(&self, contest_id: Uuid, username: &str) -> Result<()> {
        let result =
            sqlx::query("DELETE FROM contest_voters WHERE contest_id = $1 AND username = $2")
                .bind(contest_id)
                .bind(username)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn is_voter(&self, contest_id: Uuid, username: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM contest_voters
                WHERE contest_id = $1 AND username = $2
            )
            "#,
        )
        .bind(contest_id)
        .bind(username)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Open contests that `username` is allowed to rate, newest first
    pub async fn list_open_for_voter(&self, username: &str) -> Result<Vec<Contest>> {
        let contests = sqlx::query_as::<_, Contest>(
            r#"
            SELECT c.contest_id, c.name, c.description, c.status, c.owner_id, c.created_at
            FROM contests c
            INNER JOIN contest_voters v ON v.contest_id = c.contest_id
            WHERE v.username = $1 AND c.status = $2
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(username)
        .bind(ContestStatus::Open.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(contests)
    }
}
