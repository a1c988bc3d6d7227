use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{create_category, delete_category, list_categories, rename_category};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/:contest_id/categories", post(create_category))
        .route(
            "/:contest_id/categories/:category_id",
            put(rename_category).delete(delete_category),
        )
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:contest_id/categories", get(list_categories))
        .merge(protected)
}
