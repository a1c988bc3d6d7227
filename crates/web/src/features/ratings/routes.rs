use axum::{Router, middleware, routing::get};
use storage::Database;

use super::handlers::{list_ratings, submit_rating};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route(
            "/:contest_id/photos/:photo_id/ratings",
            get(list_ratings).put(submit_rating),
        )
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
