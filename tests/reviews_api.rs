#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use common::{create_user, listing_body, test_pool};
use travel_api::db;
use travel_api::models::CreateListing;

#[actix_web::test]
async fn second_review_by_same_user_conflicts() {
    let pool = test_pool().await;
    let host = create_user(&pool, "host").await;
    let guest = create_user(&pool, "guest").await;
    let other = create_user(&pool, "other").await;
    let body: CreateListing =
        serde_json::from_value(listing_body("Villa in Tbilisi", 210.0)).unwrap();
    let listing = db::listings::create(&pool, host, &body).await.unwrap();
    let app = init_app!(pool);
    let uri = format!("/listings/{}/reviews/", listing.id);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(("X-User-Id", guest.to_string()))
        .set_json(json!({"rating": 5, "comment": "Lovely stay"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let review: Value = test::read_body_json(resp).await;
    assert_eq!(review["rating"], json!(5));
    assert_eq!(review["user"], json!(guest));

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(("X-User-Id", guest.to_string()))
        .set_json(json!({"rating": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(("X-User-Id", other.to_string()))
        .set_json(json!({"rating": 3}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let reviews: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["rating"], json!(5));
    assert_eq!(reviews[0]["comment"], "Lovely stay");
    assert_eq!(reviews[1]["comment"], "");
}

#[actix_web::test]
async fn rating_outside_range_is_rejected() {
    let pool = test_pool().await;
    let host = create_user(&pool, "host").await;
    let guest = create_user(&pool, "guest").await;
    let body: CreateListing = serde_json::from_value(listing_body("Loft in Split", 99.0)).unwrap();
    let listing = db::listings::create(&pool, host, &body).await.unwrap();
    let app = init_app!(pool);

    for rating in [0, 6] {
        let req = test::TestRequest::post()
            .uri(&format!("/listings/{}/reviews/", listing.id))
            .insert_header(("X-User-Id", guest.to_string()))
            .set_json(json!({"rating": rating}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    let reviews = db::reviews::list_for_listing(&pool, listing.id).await.unwrap();
    assert!(reviews.is_empty());
}

#[actix_web::test]
async fn review_of_missing_listing_is_not_found() {
    let pool = test_pool().await;
    let guest = create_user(&pool, "guest").await;
    let app = init_app!(pool);

    let req = test::TestRequest::post()
        .uri("/listings/77/reviews/")
        .insert_header(("X-User-Id", guest.to_string()))
        .set_json(json!({"rating": 4}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
