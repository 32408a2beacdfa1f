use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::db;
use crate::error::Result;
use crate::models::CreateReview;

#[utoipa::path(
    get,
    path = "/listings/{id}/reviews/",
    tag = "reviews",
    params(("id" = i64, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Reviews of the listing", body = [crate::models::Review]),
        (status = 404, description = "No such listing", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_reviews(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let listing = db::listings::find(pool.get_ref(), path.into_inner()).await?;
    let reviews = db::reviews::list_for_listing(pool.get_ref(), listing.id).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

#[utoipa::path(
    post,
    path = "/listings/{id}/reviews/",
    tag = "reviews",
    params(
        ("id" = i64, Path, description = "Listing id"),
        ("X-User-Id" = i64, Header, description = "Reviewing user")
    ),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review stored", body = crate::models::Review),
        (status = 400, description = "Rating outside 1..=5", body = crate::error::ErrorResponse),
        (status = 404, description = "No such listing", body = crate::error::ErrorResponse),
        (status = 409, description = "Listing already reviewed by this user", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_review(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    body: web::Json<CreateReview>,
) -> Result<HttpResponse> {
    body.validate()?;

    let listing = db::listings::find(pool.get_ref(), path.into_inner()).await?;
    let review = db::reviews::create(pool.get_ref(), user.id, listing.id, &body).await?;
    log::info!("user {} reviewed listing {}", user.id, listing.id);
    Ok(HttpResponse::Created().json(review))
}
