use actix_web::HttpResponse;
use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{
    Amenity, Booking, BookingChanges, BookingStatus, CreateBooking, CreateListing, CreateReview,
    Listing, ListingChanges, Review,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Travel API",
        version = "v1",
        description = "API for listing and booking travel accommodations"
    ),
    paths(
        handlers::listings::get_listings,
        handlers::listings::get_listing_by_id,
        handlers::listings::create_listing,
        handlers::listings::replace_listing,
        handlers::listings::update_listing,
        handlers::listings::delete_listing,
        handlers::reviews::get_reviews,
        handlers::reviews::create_review,
        handlers::bookings::get_bookings,
        handlers::bookings::create_booking,
        handlers::bookings::get_booking,
        handlers::bookings::replace_booking,
        handlers::bookings::update_booking,
        handlers::bookings::delete_booking,
        handlers::amenities::get_amenities,
    ),
    components(schemas(
        Listing,
        CreateListing,
        ListingChanges,
        Booking,
        BookingStatus,
        CreateBooking,
        BookingChanges,
        Review,
        CreateReview,
        Amenity,
        ErrorResponse,
    )),
    tags(
        (name = "listings", description = "Properties offered by hosts"),
        (name = "bookings", description = "Reservations of the requesting user"),
        (name = "reviews", description = "Ratings left on listings"),
        (name = "amenities", description = "Feature tags attached to listings")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
