use sqlx::PgPool;
use storage::{
    error::Result, models::Category, repository::category::CategoryRepository,
    repository::contest::ContestRepository,
};
use uuid::Uuid;

/// Categories of a contest. Fails with `NotFound` for an unknown contest.
pub async fn list_categories(pool: &PgPool, contest_id: Uuid) -> Result<Vec<Category>> {
    ContestRepository::new(pool).find_by_id(contest_id).await?;

    let repo = CategoryRepository::new(pool);
    repo.list_for_contest(contest_id).await
}

pub async fn create_category(pool: &PgPool, contest_id: Uuid, name: &str) -> Result<Category> {
    let repo = CategoryRepository::new(pool);
    let category = repo.create(contest_id, name.trim()).await?;
    tracing::info!(
        "Created category {} ({}) in contest {}",
        category.name,
        category.category_id,
        contest_id
    );
    Ok(category)
}

pub async fn rename_category(
    pool: &PgPool,
    contest_id: Uuid,
    category_id: Uuid,
    name: &str,
) -> Result<Category> {
    let repo = CategoryRepository::new(pool);
    repo.rename(contest_id, category_id, name.trim()).await
}

pub async fn delete_category(pool: &PgPool, contest_id: Uuid, category_id: Uuid) -> Result<()> {
    let repo = CategoryRepository::new(pool);
    repo.delete(contest_id, category_id).await?;
    tracing::info!("Deleted category {} of contest {}", category_id, contest_id);
    Ok(())
}
