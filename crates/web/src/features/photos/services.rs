use sqlx::PgPool;
use storage::{
    dto::photo::CreatePhotoRequest,
    error::Result,
    models::Photo,
    repository::{contest::ContestRepository, photo::PhotoRepository},
};
use uuid::Uuid;

/// Photos of a contest with their ratings. Fails with `NotFound` for an
/// unknown contest.
pub async fn list_photos(pool: &PgPool, contest_id: Uuid) -> Result<Vec<Photo>> {
    ContestRepository::new(pool).find_by_id(contest_id).await?;

    let repo = PhotoRepository::new(pool);
    repo.list_with_ratings(contest_id).await
}

pub async fn create_photo(pool: &PgPool, contest_id: Uuid, req: &CreatePhotoRequest) -> Result<Photo> {
    ContestRepository::new(pool).find_by_id(contest_id).await?;

    let repo = PhotoRepository::new(pool);
    let photo = repo.create(contest_id, req).await?;
    tracing::info!(
        "Registered photo {} by {} in contest {}",
        photo.photo_id,
        photo.display_author(),
        contest_id
    );
    Ok(photo)
}

pub async fn delete_photo(pool: &PgPool, contest_id: Uuid, photo_id: Uuid) -> Result<()> {
    let repo = PhotoRepository::new(pool);
    let photo = repo.delete(contest_id, photo_id).await?;

    match photo.drive_file_id {
        Some(file_id) => tracing::info!(
            "Deleted photo {}; hosted file {} is no longer referenced",
            photo_id,
            file_id
        ),
        None => tracing::info!("Deleted photo {}", photo_id),
    }

    Ok(())
}
