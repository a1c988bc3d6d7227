use axum::{
    Router, middleware,
    routing::{delete, get},
};
use storage::Database;

use super::handlers::{create_photo, delete_photo, list_photos};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/:contest_id/photos", get(list_photos).post(create_photo))
        .route("/:contest_id/photos/:photo_id", delete(delete_photo))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
