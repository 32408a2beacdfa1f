use actix_web::web;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

pub mod auth;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod models;
pub mod permissions;
pub mod seed;

use error::AppError;

/// Registers every route of the API. The caller provides the
/// `web::Data<SqlitePool>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .service(
        web::scope("/listings")
            .route("/", web::get().to(handlers::listings::get_listings))
            .route("/", web::post().to(handlers::listings::create_listing))
            .route("/{id}/", web::get().to(handlers::listings::get_listing_by_id))
            .route("/{id}/", web::put().to(handlers::listings::replace_listing))
            .route("/{id}/", web::patch().to(handlers::listings::update_listing))
            .route("/{id}/", web::delete().to(handlers::listings::delete_listing))
            .route("/{id}/reviews/", web::get().to(handlers::reviews::get_reviews))
            .route("/{id}/reviews/", web::post().to(handlers::reviews::create_review)),
    )
    .service(
        web::scope("/bookings")
            .route("/", web::get().to(handlers::bookings::get_bookings))
            .route("/", web::post().to(handlers::bookings::create_booking))
            .route("/{id}/", web::get().to(handlers::bookings::get_booking))
            .route("/{id}/", web::put().to(handlers::bookings::replace_booking))
            .route("/{id}/", web::patch().to(handlers::bookings::update_booking))
            .route("/{id}/", web::delete().to(handlers::bookings::delete_booking)),
    )
    .route("/amenities/", web::get().to(handlers::amenities::get_amenities))
    .route("/api-docs/openapi.json", web::get().to(docs::openapi_json))
    .service(Redoc::with_url("/docs/", docs::ApiDoc::openapi()));
}
