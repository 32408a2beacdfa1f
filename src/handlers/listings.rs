use actix_web::{web, HttpRequest, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::db;
use crate::error::Result;
use crate::models::{CreateListing, ListingChanges, ListingFilter};
use crate::permissions::ensure_owner;

#[utoipa::path(
    get,
    path = "/listings/",
    tag = "listings",
    params(ListingFilter),
    responses((status = 200, description = "Listings matching the filters", body = [crate::models::Listing]))
)]
pub async fn get_listings(
    pool: web::Data<SqlitePool>,
    params: web::Query<ListingFilter>,
) -> Result<HttpResponse> {
    let listings = db::listings::list(pool.get_ref(), &params).await?;
    Ok(HttpResponse::Ok().json(listings))
}

#[utoipa::path(
    get,
    path = "/listings/{id}/",
    tag = "listings",
    params(("id" = i64, Path, description = "Listing id")),
    responses(
        (status = 200, description = "The listing", body = crate::models::Listing),
        (status = 404, description = "No such listing", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_listing_by_id(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let listing = db::listings::find(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(listing))
}

#[utoipa::path(
    post,
    path = "/listings/",
    tag = "listings",
    params(("X-User-Id" = i64, Header, description = "Requesting user; becomes the host")),
    request_body = CreateListing,
    responses(
        (status = 201, description = "Listing created", body = crate::models::Listing),
        (status = 400, description = "Invalid listing", body = crate::error::ErrorResponse),
        (status = 401, description = "No requesting user", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_listing(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    body: web::Json<CreateListing>,
) -> Result<HttpResponse> {
    body.validate()?;

    let listing = db::listings::create(pool.get_ref(), user.id, &body).await?;
    log::info!("listing {} created by host {}", listing.id, user.id);
    Ok(HttpResponse::Created().json(listing))
}

#[utoipa::path(
    put,
    path = "/listings/{id}/",
    tag = "listings",
    params(
        ("id" = i64, Path, description = "Listing id"),
        ("X-User-Id" = i64, Header, description = "Requesting user, must be the host")
    ),
    request_body = CreateListing,
    responses(
        (status = 200, description = "Listing replaced", body = crate::models::Listing),
        (status = 403, description = "Requester is not the host", body = crate::error::ErrorResponse),
        (status = 404, description = "No such listing", body = crate::error::ErrorResponse)
    )
)]
pub async fn replace_listing(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    body: web::Json<CreateListing>,
) -> Result<HttpResponse> {
    body.validate()?;
    let changes = ListingChanges::from(body.into_inner());
    write_listing(&req, pool.get_ref(), &user, path.into_inner(), &changes).await
}

#[utoipa::path(
    patch,
    path = "/listings/{id}/",
    tag = "listings",
    params(
        ("id" = i64, Path, description = "Listing id"),
        ("X-User-Id" = i64, Header, description = "Requesting user, must be the host")
    ),
    request_body = ListingChanges,
    responses(
        (status = 200, description = "Listing updated", body = crate::models::Listing),
        (status = 403, description = "Requester is not the host", body = crate::error::ErrorResponse),
        (status = 404, description = "No such listing", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_listing(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    body: web::Json<ListingChanges>,
) -> Result<HttpResponse> {
    body.validate()?;
    write_listing(&req, pool.get_ref(), &user, path.into_inner(), &body).await
}

#[utoipa::path(
    delete,
    path = "/listings/{id}/",
    tag = "listings",
    params(
        ("id" = i64, Path, description = "Listing id"),
        ("X-User-Id" = i64, Header, description = "Requesting user, must be the host")
    ),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 403, description = "Requester is not the host", body = crate::error::ErrorResponse),
        (status = 404, description = "No such listing", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_listing(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let listing = db::listings::find(pool.get_ref(), id).await?;
    ensure_owner(req.method(), listing.host_id, &user)?;

    db::listings::delete(pool.get_ref(), id).await?;
    log::info!("listing {} deleted by host {}", id, user.id);
    Ok(HttpResponse::NoContent().finish())
}

async fn write_listing(
    req: &HttpRequest,
    pool: &SqlitePool,
    user: &AuthenticatedUser,
    id: i64,
    changes: &ListingChanges,
) -> Result<HttpResponse> {
    let listing = db::listings::find(pool, id).await?;
    ensure_owner(req.method(), listing.host_id, user)?;

    let updated = db::listings::update(pool, id, changes).await?;
    Ok(HttpResponse::Ok().json(updated))
}
