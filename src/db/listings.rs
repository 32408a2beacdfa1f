use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::error::{AppError, Result};
use crate::models::{CreateListing, Listing, ListingChanges, ListingFilter};

pub async fn create(pool: &SqlitePool, host_id: i64, new: &CreateListing) -> Result<Listing> {
    let mut tx = pool.begin().await?;

    let mut listing = sqlx::query_as::<_, Listing>(
        r#"
        INSERT INTO listings (host_id, title, description, address, price_per_night,
                              max_guests, bedrooms, bathrooms, is_active)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(host_id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.address)
    .bind(new.price_per_night)
    .bind(new.max_guests)
    .bind(new.bedrooms)
    .bind(new.bathrooms)
    .bind(new.is_active)
    .fetch_one(&mut *tx)
    .await?;

    listing.amenities = replace_amenities(&mut tx, listing.id, &new.amenities).await?;
    tx.commit().await?;

    log::debug!("host {} created listing {}", host_id, listing.id);
    Ok(listing)
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Listing> {
    let mut listing = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("listing"))?;

    listing.amenities = sqlx::query_scalar::<_, i64>(
        "SELECT amenity_id FROM listing_amenities WHERE listing_id = ? ORDER BY amenity_id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(listing)
}

pub async fn list(pool: &SqlitePool, filter: &ListingFilter) -> Result<Vec<Listing>> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM listings WHERE 1=1");

    if let Some(price) = filter.price_per_night {
        query.push(" AND price_per_night = ").push_bind(price);
    }
    if let Some(bedrooms) = filter.bedrooms {
        query.push(" AND bedrooms = ").push_bind(bedrooms);
    }
    if let Some(bathrooms) = filter.bathrooms {
        query.push(" AND bathrooms = ").push_bind(bathrooms);
    }
    if let Some(term) = filter.search_term() {
        let pattern = format!("%{}%", escape_like(term));
        query
            .push(" AND (title LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR description LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR address LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
    query.push(" ORDER BY ").push(filter.order_clause());

    let mut listings = query.build_query_as::<Listing>().fetch_all(pool).await?;

    let links = sqlx::query_as::<_, (i64, i64)>(
        "SELECT listing_id, amenity_id FROM listing_amenities ORDER BY amenity_id",
    )
    .fetch_all(pool)
    .await?;
    let mut by_listing: HashMap<i64, Vec<i64>> = HashMap::new();
    for (listing_id, amenity_id) in links {
        by_listing.entry(listing_id).or_default().push(amenity_id);
    }
    for listing in &mut listings {
        listing.amenities = by_listing.remove(&listing.id).unwrap_or_default();
    }

    Ok(listings)
}

/// Escapes LIKE wildcards so the term matches literally under `ESCAPE '\'`.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Writes `changes` over the stored listing and bumps `updated_at`.
pub async fn update(pool: &SqlitePool, id: i64, changes: &ListingChanges) -> Result<Listing> {
    let mut tx = pool.begin().await?;

    let mut listing = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("listing"))?;
    listing.apply(changes);

    let mut updated = sqlx::query_as::<_, Listing>(
        r#"
        UPDATE listings
        SET title = ?, description = ?, address = ?, price_per_night = ?,
            max_guests = ?, bedrooms = ?, bathrooms = ?, is_active = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&listing.title)
    .bind(&listing.description)
    .bind(&listing.address)
    .bind(listing.price_per_night)
    .bind(listing.max_guests)
    .bind(listing.bedrooms)
    .bind(listing.bathrooms)
    .bind(listing.is_active)
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    updated.amenities = match &changes.amenities {
        Some(amenities) => replace_amenities(&mut tx, id, amenities).await?,
        None => {
            sqlx::query_scalar::<_, i64>(
                "SELECT amenity_id FROM listing_amenities WHERE listing_id = ? ORDER BY amenity_id",
            )
            .bind(id)
            .fetch_all(&mut *tx)
            .await?
        }
    };
    tx.commit().await?;

    log::debug!("updated listing {}", id);
    Ok(updated)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM listings WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("listing"));
    }
    log::debug!("deleted listing {}", id);
    Ok(())
}

/// Replaces the amenity links of a listing, returning the stored ids in order.
async fn replace_amenities(
    conn: &mut SqliteConnection,
    listing_id: i64,
    amenities: &[i64],
) -> Result<Vec<i64>> {
    let mut ids = amenities.to_vec();
    ids.sort_unstable();
    ids.dedup();

    sqlx::query("DELETE FROM listing_amenities WHERE listing_id = ?")
        .bind(listing_id)
        .execute(&mut *conn)
        .await?;

    for amenity_id in &ids {
        sqlx::query("INSERT INTO listing_amenities (listing_id, amenity_id) VALUES (?, ?)")
            .bind(listing_id)
            .bind(*amenity_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::NotFound(_) => AppError::not_found(format!("amenity {}", amenity_id)),
                other => other,
            })?;
    }

    Ok(ids)
}
