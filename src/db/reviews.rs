use sqlx::SqlitePool;

use crate::error::{AppError, Result};
use crate::models::{CreateReview, Review};

/// Stores a review. A second review by the same user for the same listing
/// trips the `(user_id, listing_id)` unique index and becomes a conflict.
pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    listing_id: i64,
    new: &CreateReview,
) -> Result<Review> {
    let review = sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (user_id, listing_id, rating, comment)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(listing_id)
    .bind(new.rating)
    .bind(&new.comment)
    .fetch_one(pool)
    .await
    .map_err(|e| match AppError::from(e) {
        AppError::Conflict(_) => {
            AppError::Conflict("user has already reviewed this listing".to_string())
        }
        other => other,
    })?;

    log::debug!(
        "user {} rated listing {} {}/5",
        user_id,
        listing_id,
        review.rating
    );
    Ok(review)
}

pub async fn list_for_listing(pool: &SqlitePool, listing_id: i64) -> Result<Vec<Review>> {
    let reviews =
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE listing_id = ? ORDER BY id")
            .bind(listing_id)
            .fetch_all(pool)
            .await?;
    Ok(reviews)
}
