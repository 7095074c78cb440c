use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{Map, Value};
use sqlx::sqlite::SqlitePool;

use crate::error::ApiError;
use crate::models::Player;
use crate::service;

// GET /api/players/welcome - Identity banner
pub async fn welcome() -> &'static str {
    "Tennis Player REST API"
}

// GET /api/players - List all players
pub async fn get_players(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = service::get_all(&pool).await?;

    Ok(Json(players))
}

// GET /api/players/:id - Get player by ID
pub async fn get_player_by_id(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<Player>, ApiError> {
    let player = service::get(&pool, id).await?;

    Ok(Json(player))
}

// POST /api/players - Create a player, id assigned by the database
pub async fn create_player(
    State(pool): State<SqlitePool>,
    Json(player): Json<Player>,
) -> Result<Json<Player>, ApiError> {
    let created = service::create(&pool, player).await?;

    Ok(Json(created))
}

// PUT /api/players/:id - Replace every field of an existing player
pub async fn update_player(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(player): Json<Player>,
) -> Result<Json<Player>, ApiError> {
    let updated = service::update(&pool, id, player).await?;

    Ok(Json(updated))
}

// PATCH /api/players/:id - Update the named fields, leave the rest untouched
pub async fn patch_player(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(props): Json<Map<String, Value>>,
) -> Result<Json<Player>, ApiError> {
    let patched = service::patch(&pool, id, props).await?;

    Ok(Json(patched))
}

// PATCH /api/players/:id/titles - Set the title count from a raw integer body
pub async fn patch_player_titles(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    body: String,
) -> Result<StatusCode, ApiError> {
    let titles: i64 = body.trim().parse().map_err(|_| {
        ApiError::InvalidBody(format!("expected an integer title count, got '{}'", body.trim()))
    })?;

    service::patch_titles(&pool, id, titles).await?;

    Ok(StatusCode::OK)
}

// DELETE /api/players/:id - Delete the player, confirming which id was removed
pub async fn delete_player(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<String, ApiError> {
    service::delete(&pool, id).await
}
