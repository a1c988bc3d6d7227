use anyhow::Context;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;

use config::Config;
use features::{categories, contests, photos, ranking, ratings};
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        contests::handlers::list_contests,
        contests::handlers::get_contest,
        contests::handlers::create_contest,
        contests::handlers::update_contest,
        contests::handlers::update_contest_status,
        contests::handlers::delete_contest,
        contests::handlers::list_voters,
        contests::handlers::add_voter,
        contests::handlers::remove_voter,
        contests::handlers::list_open_contests_for_voter,
        categories::handlers::list_categories,
        categories::handlers::create_category,
        categories::handlers::rename_category,
        categories::handlers::delete_category,
        photos::handlers::list_photos,
        photos::handlers::create_photo,
        photos::handlers::delete_photo,
        ratings::handlers::submit_rating,
        ratings::handlers::list_ratings,
        ranking::handlers::get_contest_ranking,
        ranking::handlers::export_contest_ranking,
    ),
    components(
        schemas(
            storage::dto::contest::CreateContestRequest,
            storage::dto::contest::UpdateContestRequest,
            storage::dto::contest::UpdateContestStatusRequest,
            storage::dto::contest::AddVoterRequest,
            storage::dto::contest::ContestResponse,
            storage::dto::contest::VotersResponse,
            storage::dto::category::CreateCategoryRequest,
            storage::dto::category::RenameCategoryRequest,
            storage::dto::photo::CreatePhotoRequest,
            storage::dto::rating::SubmitRatingRequest,
            storage::dto::rating::RatingResponse,
            storage::dto::ranking::RankingEntry,
            storage::dto::common::PaginationMeta,
            storage::models::Contest,
            storage::models::ContestStatus,
            storage::models::Category,
            storage::models::Photo,
            storage::models::Rating,
            storage::models::CriterionScores,
            storage::models::Score,
        )
    ),
    tags(
        (name = "contests", description = "Contest management and evaluator allowlists"),
        (name = "categories", description = "Contest categories"),
        (name = "photos", description = "Photo submissions"),
        (name = "ratings", description = "Evaluator ratings"),
        (name = "rankings", description = "Public ranking endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting photo contest API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty; every protected endpoint will answer 401");
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    let app = routes::configure(api_keys)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(db);

    let bind_address = config.bind_address();
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
