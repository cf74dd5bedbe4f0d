//! Storefront HTTP API tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use phantom_spares_integration_tests::TestContext;
use phantom_spares_storefront::services::{AcceptAnyCredentials, RequireValidEmail};
use phantom_spares_storefront::storage::{KeyValueStore, MemoryStore, keys};

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let resp = ctx.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!("ok"));
}

#[tokio::test]
async fn test_listing_first_page() {
    let ctx = TestContext::new();
    let resp = ctx.get("/products").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["items"].as_array().unwrap().len(), 12);
    assert_eq!(resp.body["total_items"], 100);
    assert_eq!(resp.body["total_pages"], 9);
    assert_eq!(resp.body["page"], 1);
    assert_eq!(resp.body["no_results"], false);
    assert_eq!(resp.body["items"][0]["id"], 1);
}

#[tokio::test]
async fn test_listing_search_and_sort() {
    let ctx = TestContext::new();
    let resp = ctx.get("/products?q=BRAKE&sort=price-low").await;
    assert_eq!(resp.status, StatusCode::OK);

    let items = resp.body["items"].as_array().unwrap();
    assert!(!items.is_empty());
    for item in items {
        let name = item["name"].as_str().unwrap().to_lowercase();
        let category = item["category"].as_str().unwrap().to_lowercase();
        assert!(name.contains("brake") || category.contains("brake"));
    }
    let prices: Vec<u64> = items.iter().map(|i| i["price"].as_u64().unwrap()).collect();
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_listing_no_results() {
    let ctx = TestContext::new();
    let resp = ctx.get("/products?q=flux%20capacitor").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["no_results"], true);
    assert_eq!(resp.body["total_pages"], 0);
    assert!(resp.body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_rejects_unknown_sort() {
    let ctx = TestContext::new();
    let resp = ctx.get("/products?sort=cheapest").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body["error"].as_str().unwrap().contains("cheapest"));
}

#[tokio::test]
async fn test_product_detail_and_not_found() {
    let ctx = TestContext::new();

    let resp = ctx.get("/products/5").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["product"]["id"], 5);
    let related = resp.body["related"].as_array().unwrap();
    assert!(related.len() <= 4);
    for other in related {
        assert_eq!(other["category"], resp.body["product"]["category"]);
        assert_ne!(other["id"], 5);
    }

    let resp = ctx.get("/products/999").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_categories() {
    let ctx = TestContext::new();
    let resp = ctx.get("/categories").await;
    assert_eq!(resp.status, StatusCode::OK);
    let categories = resp.body.as_array().unwrap();
    assert_eq!(categories.len(), 10);
    let total: u64 = categories
        .iter()
        .map(|c| c["product_count"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 100);
    let wheels = categories.iter().find(|c| c["name"] == "Wheels").unwrap();
    assert_eq!(wheels["selling_unit"], "set");
}

#[tokio::test]
async fn test_cart_flow() {
    let ctx = TestContext::new();

    let resp = ctx
        .post("/cart/add", Some(json!({ "product_id": 7, "quantity": 2 })))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["lines"][0]["quantity"], 2);

    let resp = ctx.post("/cart/add", Some(json!({ "product_id": 7 }))).await;
    assert_eq!(resp.body["lines"][0]["quantity"], 3);
    assert_eq!(resp.body["lines"].as_array().unwrap().len(), 1);

    let resp = ctx.get("/cart/count").await;
    assert_eq!(resp.body["count"], 3);

    let resp = ctx
        .post("/cart/update", Some(json!({ "product_id": 7, "quantity": 5 })))
        .await;
    assert_eq!(resp.body["changed"], true);
    assert_eq!(resp.body["summary"]["item_count"], 5);

    let resp = ctx
        .post("/cart/remove", Some(json!({ "product_id": 7 })))
        .await;
    assert_eq!(resp.body["changed"], true);
    assert!(resp.body["lines"].as_array().unwrap().is_empty());
    assert_eq!(resp.body["summary"]["total"], 0);
}

#[tokio::test]
async fn test_cart_rejects_zero_quantity_and_unknown_product() {
    let ctx = TestContext::new();
    ctx.post("/cart/add", Some(json!({ "product_id": 1 }))).await;

    let resp = ctx
        .post("/cart/update", Some(json!({ "product_id": 1, "quantity": 0 })))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(ctx.get("/cart/count").await.body["count"], 1);

    let resp = ctx
        .post("/cart/add", Some(json!({ "product_id": 4242 })))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let storage = Arc::new(MemoryStore::new());
    let ctx = TestContext::with_storage(storage.clone());
    ctx.post("/cart/add", Some(json!({ "product_id": 3, "quantity": 4 })))
        .await;
    assert!(storage.get(keys::CART).unwrap().is_some());

    let restarted = TestContext::with_storage(storage);
    let resp = restarted.get("/cart").await;
    assert_eq!(resp.body["summary"]["item_count"], 4);
}

#[tokio::test]
async fn test_auth_flow() {
    let ctx = TestContext::new();

    let resp = ctx.get("/auth/me").await;
    assert_eq!(resp.body["authenticated"], false);

    let resp = ctx
        .post(
            "/auth/login?redirect=/cart",
            Some(json!({ "email": "njeri@example.com", "password": "pw" })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["user"]["name"], "njeri");
    assert_eq!(resp.body["user"]["id"], 1);
    assert_eq!(resp.body["redirect"], "/cart");

    let resp = ctx.get("/auth/me").await;
    assert_eq!(resp.body["authenticated"], true);
    assert_eq!(resp.body["user"]["email"], "njeri@example.com");

    let resp = ctx.post("/auth/logout", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(ctx.get("/auth/me").await.body["authenticated"], false);
}

#[tokio::test]
async fn test_register_and_free_form_email() {
    let ctx = TestContext::new();

    let resp = ctx
        .post(
            "/auth/register",
            Some(json!({ "email": "njeri@example.com", "password": "pw", "name": "Njeri M" })),
        )
        .await;
    assert_eq!(resp.body["user"]["name"], "Njeri M");
    assert_eq!(resp.body["redirect"], "/");

    let resp = ctx
        .post(
            "/auth/login",
            Some(json!({ "email": "otieno", "password": "pw" })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["user"]["name"], "otieno");
    assert_eq!(resp.body["user"]["email"], "otieno");
}

#[tokio::test]
async fn test_strict_verifier_rejects_malformed_email() {
    let ctx = TestContext::with_verifier(Arc::new(RequireValidEmail(AcceptAnyCredentials)));

    let resp = ctx
        .post("/auth/login", Some(json!({ "email": "otieno", "password": "pw" })))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "Invalid email address");
    assert_eq!(ctx.get("/auth/me").await.body["authenticated"], false);

    let resp = ctx
        .post(
            "/auth/login",
            Some(json!({ "email": "otieno@example.com", "password": "pw" })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_checkout_requires_login() {
    let ctx = TestContext::new();
    ctx.post("/cart/add", Some(json!({ "product_id": 2 }))).await;

    let resp = ctx.post("/checkout", None).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/auth/login?redirect=/cart"));
    assert_eq!(ctx.get("/cart/count").await.body["count"], 1);
}

#[tokio::test]
async fn test_checkout_places_order_and_clears_cart() {
    let ctx = TestContext::new();
    ctx.post("/cart/add", Some(json!({ "product_id": 2, "quantity": 2 })))
        .await;
    ctx.post(
        "/auth/login",
        Some(json!({ "email": "njeri@example.com", "password": "pw" })),
    )
    .await;

    let resp = ctx.post("/checkout", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["redirect"], "/checkout/success");
    assert_eq!(resp.body["summary"]["item_count"], 2);
    assert_eq!(resp.body["summary"]["shipping"], 0);
    assert!(resp.body["order_id"].as_str().is_some());

    assert_eq!(ctx.get("/cart/count").await.body["count"], 0);

    let resp = ctx.post("/checkout", None).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test(start_paused = true)]
async fn test_cart_readable_while_order_pending() {
    let ctx = TestContext::with_checkout_delay(Duration::from_secs(2));
    ctx.post("/cart/add", Some(json!({ "product_id": 2, "quantity": 2 })))
        .await;
    ctx.post(
        "/auth/login",
        Some(json!({ "email": "njeri@example.com", "password": "pw" })),
    )
    .await;

    let router = ctx.router.clone();
    let pending = tokio::spawn(async move {
        router
            .oneshot(Request::post("/checkout").body(Body::empty()).unwrap())
            .await
            .unwrap()
    });

    // Let the order start and park in its processing delay.
    tokio::time::sleep(Duration::from_millis(10)).await;

    let resp = tokio::time::timeout(Duration::from_millis(100), ctx.get("/cart/count"))
        .await
        .expect("cart read blocked by pending checkout");
    assert_eq!(resp.body["count"], 2);

    let response = pending.await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ctx.get("/cart/count").await.body["count"], 0);
}

#[tokio::test]
async fn test_request_id_header() {
    let ctx = TestContext::new();
    let response = ctx
        .router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
