use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use crate::auth::AuthenticatedUser;
use crate::db;
use crate::error::Result;
use crate::models::{BookingChanges, BookingFilter, CreateBooking};

// Every booking route is scoped to the requester: another user's booking is
// reported as not found rather than forbidden.

#[utoipa::path(
    get,
    path = "/bookings/",
    tag = "bookings",
    params(
        BookingFilter,
        ("X-User-Id" = i64, Header, description = "Requesting user")
    ),
    responses(
        (status = 200, description = "The requester's bookings", body = [crate::models::Booking]),
        (status = 401, description = "No requesting user", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_bookings(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    params: web::Query<BookingFilter>,
) -> Result<HttpResponse> {
    let bookings = db::bookings::list_for_user(pool.get_ref(), user.id, &params).await?;
    Ok(HttpResponse::Ok().json(bookings))
}

#[utoipa::path(
    post,
    path = "/bookings/",
    tag = "bookings",
    params(("X-User-Id" = i64, Header, description = "Requesting user; becomes the guest")),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created with its derived total price", body = crate::models::Booking),
        (status = 400, description = "check_out is not after check_in", body = crate::error::ErrorResponse),
        (status = 404, description = "No such listing", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    body: web::Json<CreateBooking>,
) -> Result<HttpResponse> {
    let booking = db::bookings::create(pool.get_ref(), user.id, &body).await?;
    log::info!(
        "booking {} created by user {} on listing {} ({:.2})",
        booking.id,
        user.id,
        booking.listing_id,
        booking.total_price
    );
    Ok(HttpResponse::Created().json(booking))
}

#[utoipa::path(
    get,
    path = "/bookings/{id}/",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking id"),
        ("X-User-Id" = i64, Header, description = "Requesting user")
    ),
    responses(
        (status = 200, description = "The booking", body = crate::models::Booking),
        (status = 404, description = "No such booking for this user", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_booking(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let booking = db::bookings::find_for_user(pool.get_ref(), path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(booking))
}

#[utoipa::path(
    put,
    path = "/bookings/{id}/",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking id"),
        ("X-User-Id" = i64, Header, description = "Requesting user")
    ),
    request_body = CreateBooking,
    responses(
        (status = 200, description = "Booking replaced; total price recalculated", body = crate::models::Booking),
        (status = 400, description = "check_out is not after check_in", body = crate::error::ErrorResponse),
        (status = 404, description = "No such booking or listing", body = crate::error::ErrorResponse)
    )
)]
pub async fn replace_booking(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    body: web::Json<CreateBooking>,
) -> Result<HttpResponse> {
    let changes = BookingChanges::from(body.into_inner());
    write_booking(pool.get_ref(), &user, path.into_inner(), &changes).await
}

#[utoipa::path(
    patch,
    path = "/bookings/{id}/",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking id"),
        ("X-User-Id" = i64, Header, description = "Requesting user")
    ),
    request_body = BookingChanges,
    responses(
        (status = 200, description = "Booking updated; total price recalculated", body = crate::models::Booking),
        (status = 400, description = "check_out is not after check_in", body = crate::error::ErrorResponse),
        (status = 404, description = "No such booking or listing", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_booking(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    body: web::Json<BookingChanges>,
) -> Result<HttpResponse> {
    write_booking(pool.get_ref(), &user, path.into_inner(), &body).await
}

#[utoipa::path(
    delete,
    path = "/bookings/{id}/",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking id"),
        ("X-User-Id" = i64, Header, description = "Requesting user")
    ),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "No such booking for this user", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_booking(
    pool: web::Data<SqlitePool>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let booking = db::bookings::find_for_user(pool.get_ref(), path.into_inner(), user.id).await?;
    db::bookings::delete(pool.get_ref(), booking.id).await?;

    log::info!("booking {} deleted by user {}", booking.id, user.id);
    Ok(HttpResponse::NoContent().finish())
}

async fn write_booking(
    pool: &SqlitePool,
    user: &AuthenticatedUser,
    id: i64,
    changes: &BookingChanges,
) -> Result<HttpResponse> {
    let mut booking = db::bookings::find_for_user(pool, id, user.id).await?;
    booking.apply(changes);

    let saved = db::bookings::save(pool, &booking).await?;
    Ok(HttpResponse::Ok().json(saved))
}
