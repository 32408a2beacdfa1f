#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use common::{create_user, listing_body, test_pool};
use travel_api::db;
use travel_api::models::NewAmenity;

#[actix_web::test]
async fn create_sets_host_to_requester() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let app = init_app!(pool);

    let mut body = listing_body("Loft in Lisbon", 120.0);
    body["host"] = json!(bob);

    let req = test::TestRequest::post()
        .uri("/listings/")
        .insert_header(("X-User-Id", alice.to_string()))
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let listing: Value = test::read_body_json(resp).await;
    assert_eq!(listing["host"], json!(alice));
    assert_eq!(listing["title"], "Loft in Lisbon");
    assert_eq!(listing["is_active"], json!(true));
}

#[actix_web::test]
async fn create_without_user_is_unauthenticated() {
    let pool = test_pool().await;
    let app = init_app!(pool);

    let req = test::TestRequest::post()
        .uri("/listings/")
        .set_json(listing_body("Villa in Split", 300.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_rejects_invalid_fields() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;
    let app = init_app!(pool);

    let mut body = listing_body("House in Oslo", 90.0);
    body["bedrooms"] = json!(-1);
    let req = test::TestRequest::post()
        .uri("/listings/")
        .insert_header(("X-User-Id", alice.to_string()))
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/listings/")
        .insert_header(("X-User-Id", alice.to_string()))
        .set_json(listing_body("House in Oslo", 0.0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn price_is_limited_to_cents_and_ten_digits() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;
    let app = init_app!(pool);

    for price in [33.333, 1e9] {
        let req = test::TestRequest::post()
            .uri("/listings/")
            .insert_header(("X-User-Id", alice.to_string()))
            .set_json(listing_body("Studio in Porto", price))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    let req = test::TestRequest::post()
        .uri("/listings/")
        .insert_header(("X-User-Id", alice.to_string()))
        .set_json(listing_body("Studio in Porto", 33.33))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["price_per_night"], json!(33.33));

    let req = test::TestRequest::patch()
        .uri(&format!("/listings/{}/", created["id"]))
        .insert_header(("X-User-Id", alice.to_string()))
        .set_json(json!({"price_per_night": 12.345}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn anyone_can_read_a_listing() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;
    let app = init_app!(pool);

    let req = test::TestRequest::post()
        .uri("/listings/")
        .insert_header(("X-User-Id", alice.to_string()))
        .set_json(listing_body("Cottage in Hobart", 75.0))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/listings/{}/", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/listings/999/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn only_host_can_modify_or_delete() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let app = init_app!(pool);

    let req = test::TestRequest::post()
        .uri("/listings/")
        .insert_header(("X-User-Id", alice.to_string()))
        .set_json(listing_body("Apartment in Kyoto", 110.0))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/listings/{}/", created["id"]);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(("X-User-Id", bob.to_string()))
        .set_json(json!({"price_per_night": 1.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("X-User-Id", bob.to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(("X-User-Id", alice.to_string()))
        .set_json(json!({"price_per_night": 130.0, "is_active": false}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["price_per_night"], json!(130.0));
    assert_eq!(updated["is_active"], json!(false));
    assert_eq!(updated["title"], "Apartment in Kyoto");
    assert_eq!(updated["host"], json!(alice));

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(("X-User-Id", alice.to_string()))
        .set_json(listing_body("Townhouse in Kyoto", 140.0))
        .to_request();
    let replaced: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(replaced["title"], "Townhouse in Kyoto");
    assert_eq!(replaced["is_active"], json!(true));

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("X-User-Id", alice.to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn filters_search_and_ordering() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;
    let app = init_app!(pool);

    let mut cheap = listing_body("Cabin in the woods", 60.0);
    cheap["bedrooms"] = json!(1);
    let mut mid = listing_body("Flat near Market Square", 150.0);
    mid["description"] = json!("Sea views from the balcony");
    let mut pricey = listing_body("Villa in Marrakesh", 400.0);
    pricey["bedrooms"] = json!(5);
    pricey["bathrooms"] = json!(3);
    pricey["address"] = json!("1 Riad Lane, Marrakesh");

    for body in [&cheap, &mid, &pricey] {
        let req = test::TestRequest::post()
            .uri("/listings/")
            .insert_header(("X-User-Id", alice.to_string()))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let titles = |listings: Vec<Value>| -> Vec<String> {
        listings
            .iter()
            .map(|l| l["title"].as_str().unwrap().to_string())
            .collect()
    };

    let req = test::TestRequest::get()
        .uri("/listings/?ordering=-price_per_night")
        .to_request();
    let listings: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        titles(listings),
        vec![
            "Villa in Marrakesh",
            "Flat near Market Square",
            "Cabin in the woods"
        ]
    );

    let req = test::TestRequest::get()
        .uri("/listings/?bedrooms=5&bathrooms=3")
        .to_request();
    let listings: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(listings), vec!["Villa in Marrakesh"]);

    let req = test::TestRequest::get()
        .uri("/listings/?price_per_night=150")
        .to_request();
    let listings: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(listings), vec!["Flat near Market Square"]);

    // search covers title, description and address, case-insensitively
    let req = test::TestRequest::get()
        .uri("/listings/?search=SEA%20VIEWS")
        .to_request();
    let listings: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(listings), vec!["Flat near Market Square"]);

    let req = test::TestRequest::get()
        .uri("/listings/?search=riad")
        .to_request();
    let listings: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(listings), vec!["Villa in Marrakesh"]);

    // wildcard characters are matched literally
    for search in ["_", "%25", "%5C"] {
        let req = test::TestRequest::get()
            .uri(&format!("/listings/?search={}", search))
            .to_request();
        let listings: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert!(listings.is_empty(), "search={} matched {:?}", search, listings);
    }

    let req = test::TestRequest::get()
        .uri("/listings/?bedrooms=many")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn amenities_are_linked_and_replaced() {
    let pool = test_pool().await;
    let alice = create_user(&pool, "alice").await;
    let (wifi, _) = db::amenities::get_or_create(&pool, &NewAmenity::new("WiFi", "fa-wifi"))
        .await
        .unwrap();
    let (pool_amenity, _) =
        db::amenities::get_or_create(&pool, &NewAmenity::new("Pool", "fa-swimming-pool"))
            .await
            .unwrap();
    let app = init_app!(pool);

    let mut body = listing_body("House in Cusco", 95.0);
    body["amenities"] = json!([pool_amenity.id, wifi.id, wifi.id]);
    let req = test::TestRequest::post()
        .uri("/listings/")
        .insert_header(("X-User-Id", alice.to_string()))
        .set_json(&body)
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["amenities"], json!([wifi.id, pool_amenity.id]));
    let uri = format!("/listings/{}/", created["id"]);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(("X-User-Id", alice.to_string()))
        .set_json(json!({"amenities": [pool_amenity.id]}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["amenities"], json!([pool_amenity.id]));

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(("X-User-Id", alice.to_string()))
        .set_json(json!({"amenities": [4242]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/amenities/").to_request();
    let amenities: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(amenities.len(), 2);
}
