use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use crate::db;
use crate::error::Result;

#[utoipa::path(
    get,
    path = "/amenities/",
    tag = "amenities",
    responses((status = 200, description = "All amenities", body = [crate::models::Amenity]))
)]
pub async fn get_amenities(pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    let amenities = db::amenities::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(amenities))
}
