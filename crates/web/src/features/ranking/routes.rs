use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{export_contest_ranking, get_contest_ranking};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/:contest_id", get(get_contest_ranking))
        .route("/:contest_id/export", get(export_contest_ranking))
}
