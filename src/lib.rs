use axum::{
    middleware,
    routing::{get, patch},
    Router,
};
use sqlx::sqlite::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod service;

/// Assemble the router over an already-seeded pool. Kept out of `main` so
/// integration tests can drive the full surface without binding a port.
pub fn app(pool: SqlitePool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Tennis Players API - v1.0" }))
        .route("/health", get(routes::health::health_check))

        // Player endpoints
        .route("/api/players/welcome", get(routes::players::welcome))
        .route(
            "/api/players",
            get(routes::players::get_players).post(routes::players::create_player),
        )
        .route(
            "/api/players/{id}",
            get(routes::players::get_player_by_id)
                .put(routes::players::update_player)
                .patch(routes::players::patch_player)
                .delete(routes::players::delete_player),
        )
        .route(
            "/api/players/{id}/titles",
            patch(routes::players::patch_player_titles),
        )

        .layer(middleware::from_fn(error::render_errors))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(pool)
}
