use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{Amenity, NewAmenity};

/// Returns the amenity with exactly this name and icon, inserting it first if
/// it does not exist yet. The flag is `true` when a row was created.
pub async fn get_or_create(pool: &SqlitePool, new: &NewAmenity) -> Result<(Amenity, bool)> {
    let existing = sqlx::query_as::<_, Amenity>(
        "SELECT * FROM amenities WHERE name = ? AND icon = ? ORDER BY id LIMIT 1",
    )
    .bind(&new.name)
    .bind(&new.icon)
    .fetch_optional(pool)
    .await?;

    if let Some(amenity) = existing {
        return Ok((amenity, false));
    }

    let amenity =
        sqlx::query_as::<_, Amenity>("INSERT INTO amenities (name, icon) VALUES (?, ?) RETURNING *")
            .bind(&new.name)
            .bind(&new.icon)
            .fetch_one(pool)
            .await?;

    log::debug!("created amenity {} ({})", amenity.id, amenity.name);
    Ok((amenity, true))
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Amenity>> {
    let amenities = sqlx::query_as::<_, Amenity>("SELECT * FROM amenities ORDER BY name, id")
        .fetch_all(pool)
        .await?;
    Ok(amenities)
}

pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM amenities")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
