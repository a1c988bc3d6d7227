use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    add_voter, create_contest, delete_contest, get_contest, list_contests,
    list_open_contests_for_voter, list_voters, remove_voter, update_contest,
    update_contest_status,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_contest))
        .route("/:contest_id", put(update_contest).delete(delete_contest))
        .route("/:contest_id/status", put(update_contest_status))
        .route("/:contest_id/voters", get(list_voters).post(add_voter))
        .route("/:contest_id/voters/:username", delete(remove_voter))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_contests))
        .route("/:contest_id", get(get_contest))
        .merge(protected)
}

pub fn voter_routes() -> Router<Database> {
    Router::new().route("/:username/contests", get(list_open_contests_for_voter))
}
