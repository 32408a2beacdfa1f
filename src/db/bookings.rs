use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::error::{AppError, Result};
use crate::models::booking::{total_price, validate_stay};
use crate::models::{Booking, BookingFilter, CreateBooking};

/// Creates a booking for `user_id`. The total price is derived from the
/// listing's current nightly rate; nothing in the request can set it.
pub async fn create(pool: &SqlitePool, user_id: i64, new: &CreateBooking) -> Result<Booking> {
    validate_stay(new.check_in, new.check_out)?;

    let mut tx = pool.begin().await?;

    let price_per_night = listing_price(&mut tx, new.listing).await?;
    let total = total_price(new.check_in, new.check_out, price_per_night);

    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings (user_id, listing_id, check_in, check_out, total_price, status)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(new.listing)
    .bind(new.check_in)
    .bind(new.check_out)
    .bind(total)
    .bind(new.status)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    log::debug!(
        "user {} booked listing {} for {} nights ({:.2})",
        user_id,
        booking.listing_id,
        booking.nights(),
        booking.total_price
    );
    Ok(booking)
}

/// Persists an edited booking. The total price is recalculated on every
/// save from the dates and whatever the listing charges right now, so
/// changing dates (or the listing's rate) changes the stored total.
pub async fn save(pool: &SqlitePool, booking: &Booking) -> Result<Booking> {
    validate_stay(booking.check_in, booking.check_out)?;

    let mut tx = pool.begin().await?;

    let price_per_night = listing_price(&mut tx, booking.listing_id).await?;
    let total = total_price(booking.check_in, booking.check_out, price_per_night);

    let saved = sqlx::query_as::<_, Booking>(
        r#"
        UPDATE bookings
        SET listing_id = ?, check_in = ?, check_out = ?, total_price = ?, status = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(booking.listing_id)
    .bind(booking.check_in)
    .bind(booking.check_out)
    .bind(total)
    .bind(booking.status)
    .bind(booking.id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::not_found("booking"))?;

    tx.commit().await?;

    if saved.total_price != booking.total_price {
        log::info!(
            "booking {} total price changed from {:.2} to {:.2}",
            saved.id,
            booking.total_price,
            saved.total_price
        );
    }
    Ok(saved)
}

/// Looks up a booking owned by `user_id`. Bookings of other users are
/// reported as missing.
pub async fn find_for_user(pool: &SqlitePool, id: i64, user_id: i64) -> Result<Booking> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("booking"))
}

pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
    filter: &BookingFilter,
) -> Result<Vec<Booking>> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM bookings WHERE user_id = ");
    query.push_bind(user_id);

    if let Some(listing) = filter.listing {
        query.push(" AND listing_id = ").push_bind(listing);
    }
    if let Some(start) = filter.start_date {
        query.push(" AND check_in >= ").push_bind(start);
    }
    if let Some(end) = filter.end_date {
        query.push(" AND check_out <= ").push_bind(end);
    }
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status);
    }
    query.push(" ORDER BY check_in, id");

    let bookings = query.build_query_as::<Booking>().fetch_all(pool).await?;
    Ok(bookings)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("booking"));
    }
    log::debug!("deleted booking {}", id);
    Ok(())
}

async fn listing_price(conn: &mut SqliteConnection, listing_id: i64) -> Result<f64> {
    sqlx::query_scalar::<_, f64>("SELECT price_per_night FROM listings WHERE id = ?")
        .bind(listing_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::not_found("listing"))
}
