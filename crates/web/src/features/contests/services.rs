use sqlx::PgPool;
use storage::{
    dto::contest::{CreateContestRequest, UpdateContestRequest},
    error::Result,
    models::{Contest, ContestStatus},
    repository::contest::ContestRepository,
};
use uuid::Uuid;

/// List contests, newest first
pub async fn list_contests(pool: &PgPool, status: Option<ContestStatus>) -> Result<Vec<Contest>> {
    let repo = ContestRepository::new(pool);
    repo.list(status).await
}

pub async fn get_contest(pool: &PgPool, contest_id: Uuid) -> Result<Contest> {
    let repo = ContestRepository::new(pool);
    repo.find_by_id(contest_id).await
}

pub async fn create_contest(pool: &PgPool, req: &CreateContestRequest) -> Result<Contest> {
    let repo = ContestRepository::new(pool);
    let contest = repo.create(req).await?;
    tracing::info!("Created contest {} ({})", contest.name, contest.contest_id);
    Ok(contest)
}

pub async fn update_contest(
    pool: &PgPool,
    contest_id: Uuid,
    req: &UpdateContestRequest,
) -> Result<Contest> {
    let repo = ContestRepository::new(pool);
    repo.update_details(contest_id, req).await
}

pub async fn update_contest_status(
    pool: &PgPool,
    contest_id: Uuid,
    status: ContestStatus,
) -> Result<Contest> {
    let repo = ContestRepository::new(pool);
    let contest = repo.update_status(contest_id, status).await?;
    tracing::info!("Contest {} is now {}", contest_id, status);
    Ok(contest)
}

pub async fn delete_contest(pool: &PgPool, contest_id: Uuid) -> Result<()> {
    let repo = ContestRepository::new(pool);
    repo.delete(contest_id).await?;
    tracing::info!("Deleted contest {}", contest_id);
    Ok(())
}

/// Voters of a contest. Fails with `NotFound` for an unknown contest.
pub async fn list_voters(pool: &PgPool, contest_id: Uuid) -> Result<Vec<String>> {
    let repo = ContestRepository::new(pool);
    repo.find_by_id(contest_id).await?;
    repo.list_voters(contest_id).await
}

pub async fn add_voter(pool: &PgPool, contest_id: Uuid, username: &str) -> Result<Vec<String>> {
    let repo = ContestRepository::new(pool);
    repo.add_voter(contest_id, username).await?;
    repo.list_voters(contest_id).await
}

pub async fn remove_voter(pool: &PgPool, contest_id: Uuid, username: &str) -> Result<()> {
    let repo = ContestRepository::new(pool);
    repo.remove_voter(contest_id, username).await
}

/// Open contests the evaluator may currently rate
pub async fn list_open_contests_for_voter(pool: &PgPool, username: &str) -> Result<Vec<Contest>> {
    let repo = ContestRepository::new(pool);
    repo.list_open_for_voter(username).await
}
