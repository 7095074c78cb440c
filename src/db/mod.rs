use chrono::NaiveDate;
use sqlx::sqlite::{SqliteExecutor, SqlitePool};

use crate::models::Player;

/// Create the players table if it does not exist yet.
///
/// AUTOINCREMENT keeps SQLite from handing a deleted row's id to a new row.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS players (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               name TEXT,
               nationality TEXT,
               birth_date TEXT,
               titles INTEGER NOT NULL DEFAULT 0
           )"#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert the fixed startup roster.
///
/// Runs on every boot with no emptiness check, so a durable database file
/// accumulates one copy of these rows per restart.
pub async fn seed_players(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let players = [
        Player {
            id: None,
            name: Some("Djokovic".to_string()),
            nationality: Some("Serbia".to_string()),
            birth_date: NaiveDate::from_ymd_opt(1987, 5, 22),
            titles: 81,
        },
        Player {
            id: None,
            name: Some("Monfils".to_string()),
            nationality: Some("France".to_string()),
            birth_date: NaiveDate::from_ymd_opt(1986, 9, 1),
            titles: 10,
        },
        Player {
            id: None,
            name: Some("Isner".to_string()),
            nationality: Some("USA".to_string()),
            birth_date: NaiveDate::from_ymd_opt(1985, 4, 26),
            titles: 15,
        },
    ];

    for player in players {
        save_player(pool, player).await?;
    }

    Ok(())
}

pub async fn find_all_players(pool: &SqlitePool) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"SELECT * FROM players"#
    )
    .fetch_all(pool)
    .await
}

// Generic over the executor so callers can run it inside a transaction
pub async fn find_player_by_id(
    executor: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"SELECT * FROM players WHERE id = ?"#
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Insert the player when it has no id yet, update the existing row
/// otherwise. Returns the persisted representation with the id populated.
pub async fn save_player(pool: &SqlitePool, player: Player) -> Result<Player, sqlx::Error> {
    match player.id {
        Some(id) => {
            sqlx::query(
                r#"UPDATE players SET name = ?, nationality = ?, birth_date = ?, titles = ?
                   WHERE id = ?"#,
            )
            .bind(player.name.as_deref())
            .bind(player.nationality.as_deref())
            .bind(player.birth_date)
            .bind(player.titles)
            .bind(id)
            .execute(pool)
            .await?;

            Ok(player)
        }
        None => {
            let result = sqlx::query(
                r#"INSERT INTO players (name, nationality, birth_date, titles)
                   VALUES (?, ?, ?, ?)"#,
            )
            .bind(player.name.as_deref())
            .bind(player.nationality.as_deref())
            .bind(player.birth_date)
            .bind(player.titles)
            .execute(pool)
            .await?;

            Ok(Player {
                id: Some(result.last_insert_rowid()),
                ..player
            })
        }
    }
}

/// Set only the titles column, without loading or rewriting the row.
pub async fn update_titles_by_id(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    titles: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"UPDATE players SET titles = ? WHERE id = ?"#
    )
    .bind(titles)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn delete_player_by_id(pool: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"DELETE FROM players WHERE id = ?"#
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}
