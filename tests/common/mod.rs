#![allow(dead_code)]

use serde_json::{json, Value};
use sqlx::SqlitePool;

use travel_api::db;
use travel_api::models::NewUser;

pub async fn test_pool() -> SqlitePool {
    let pool = db::in_memory_pool().await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    pool
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> i64 {
    let user = db::users::create(
        pool,
        &NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            first_name: username.to_string(),
            last_name: "Tester".to_string(),
        },
    )
    .await
    .unwrap();
    user.id
}

/// Builds the full API around `pool` as an initialised test service.
macro_rules! init_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .configure(travel_api::configure),
        )
        .await
    };
}

pub fn listing_body(title: &str, price: f64) -> Value {
    json!({
        "title": title,
        "description": "A comfortable place to stay",
        "address": "12 Harbour Road",
        "price_per_night": price,
        "max_guests": 4,
        "bedrooms": 2,
        "bathrooms": 1
    })
}
