use chrono::NaiveDate;
use serde_json::{Map, Value};
use sqlx::sqlite::SqlitePool;

use crate::db;
use crate::error::ApiError;
use crate::models::{Player, BIRTH_DATE_FORMAT};

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Player>, ApiError> {
    Ok(db::find_all_players(pool).await?)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Player, ApiError> {
    db::find_player_by_id(pool, id)
        .await?
        .ok_or(ApiError::PlayerNotFound(id))
}

/// Persist a new player. The id is assigned by the database; whatever the
/// client sent is discarded.
pub async fn create(pool: &SqlitePool, mut player: Player) -> Result<Player, ApiError> {
    player.id = None;
    Ok(db::save_player(pool, player).await?)
}

/// Overwrite every field of an existing player with the supplied values.
/// Fields missing from the request body already deserialized to their
/// defaults, so this is a full replace, not a merge.
pub async fn update(pool: &SqlitePool, id: i64, player: Player) -> Result<Player, ApiError> {
    let existing = get(pool, id).await?;

    let replacement = Player {
        id: existing.id,
        ..player
    };

    Ok(db::save_player(pool, replacement).await?)
}

/// Set each named field to the supplied value, leaving unnamed fields
/// untouched, then persist.
pub async fn patch(
    pool: &SqlitePool,
    id: i64,
    props: Map<String, Value>,
) -> Result<Player, ApiError> {
    let mut player = get(pool, id).await?;

    for (field, value) in props {
        set_field(&mut player, &field, value)?;
    }

    Ok(db::save_player(pool, player).await?)
}

/// Set only the title count, without rewriting the rest of the row.
pub async fn patch_titles(pool: &SqlitePool, id: i64, titles: i64) -> Result<(), ApiError> {
    // the existence check and the update share one transaction so a
    // concurrent delete cannot land between the two statements
    let mut tx = pool.begin().await?;

    db::find_player_by_id(&mut *tx, id)
        .await?
        .ok_or(ApiError::PlayerNotFound(id))?;
    db::update_titles_by_id(&mut *tx, id, titles).await?;

    tx.commit().await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<String, ApiError> {
    get(pool, id).await?;
    db::delete_player_by_id(pool, id).await?;

    Ok(format!("Deleted player with id: {id}"))
}

/// Apply one patch entry. Field names are case-sensitive and must match the
/// entity's JSON attribute names; anything else is rejected rather than
/// ignored. The id is not patchable.
fn set_field(player: &mut Player, field: &str, value: Value) -> Result<(), ApiError> {
    match field {
        "name" => player.name = from_value(field, value)?,
        "nationality" => player.nationality = from_value(field, value)?,
        "titles" => player.titles = from_value(field, value)?,
        "birthDate" => player.birth_date = parse_birth_date(value)?,
        "id" => return Err(ApiError::ImmutableField(field.to_string())),
        _ => return Err(ApiError::UnknownField(field.to_string())),
    }

    Ok(())
}

fn from_value<T: serde::de::DeserializeOwned>(field: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|err| ApiError::InvalidFieldValue(field.to_string(), err.to_string()))
}

fn parse_birth_date(value: Value) -> Result<Option<NaiveDate>, ApiError> {
    match value {
        Value::Null => Ok(None),
        Value::String(raw) => NaiveDate::parse_from_str(&raw, BIRTH_DATE_FORMAT)
            .map(Some)
            .map_err(|err| ApiError::InvalidFieldValue("birthDate".to_string(), err.to_string())),
        other => Err(ApiError::InvalidFieldValue(
            "birthDate".to_string(),
            format!("expected a dd-MM-yyyy string, got {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player() -> Player {
        Player {
            id: Some(1),
            name: Some("Djokovic".to_string()),
            nationality: Some("Serbia".to_string()),
            birth_date: NaiveDate::from_ymd_opt(1987, 5, 22),
            titles: 81,
        }
    }

    #[test]
    fn set_field_updates_only_the_named_field() {
        let mut player = player();
        set_field(&mut player, "titles", json!(5)).unwrap();

        assert_eq!(player.titles, 5);
        assert_eq!(player.name.as_deref(), Some("Djokovic"));
        assert_eq!(player.nationality.as_deref(), Some("Serbia"));
        assert_eq!(player.birth_date, NaiveDate::from_ymd_opt(1987, 5, 22));
    }

    #[test]
    fn set_field_parses_wire_format_dates() {
        let mut player = player();
        set_field(&mut player, "birthDate", json!("01-09-1986")).unwrap();

        assert_eq!(player.birth_date, NaiveDate::from_ymd_opt(1986, 9, 1));
    }

    #[test]
    fn set_field_accepts_null_for_nullable_fields() {
        let mut player = player();
        set_field(&mut player, "nationality", Value::Null).unwrap();
        set_field(&mut player, "birthDate", Value::Null).unwrap();

        assert_eq!(player.nationality, None);
        assert_eq!(player.birth_date, None);
    }

    #[test]
    fn set_field_rejects_unknown_names() {
        let err = set_field(&mut player(), "ranking", json!(1)).unwrap_err();
        assert!(matches!(err, ApiError::UnknownField(field) if field == "ranking"));
    }

    #[test]
    fn set_field_rejects_the_id() {
        let err = set_field(&mut player(), "id", json!(7)).unwrap_err();
        assert!(matches!(err, ApiError::ImmutableField(_)));
    }

    #[test]
    fn set_field_rejects_mistyped_values() {
        let err = set_field(&mut player(), "titles", json!("many")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidFieldValue(field, _) if field == "titles"));
    }
}
