//! Integration tests for the product listing.

use reqwest::StatusCode;
use serde_json::Value;
use threadline_integration_tests::{TestContext, product_json, seed_with_products};

fn ids(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|p| p["id"].as_str().expect("id").to_string())
        .collect()
}

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(resp.text().await.expect("body"), "ok");

    let (status, _) = ctx.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_upstream_request_id_is_echoed() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .get(ctx.url("/products"))
        .header("x-request-id", "edge-1234")
        .send()
        .await
        .expect("request");
    assert_eq!(
        resp.headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("edge-1234")
    );
}

#[tokio::test]
async fn test_price_range_is_inclusive() {
    let ctx = TestContext::with_seed(seed_with_products(vec![
        product_json("cheap", "Cheap Tee", 10_000, &["M"], 1),
        product_json("mid", "Mid Tee", 50_000, &["M"], 2),
        product_json("dear", "Dear Tee", 90_000, &["M"], 3),
    ]))
    .await;

    let (status, body) = ctx
        .get("/products?minPrice=20000&maxPrice=100000&sort=price&order=asc")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), ["mid", "dear"]);

    let (_, body) = ctx.get("/products?minPrice=50000&maxPrice=50000").await;
    assert_eq!(ids(&body), ["mid"]);
}

#[tokio::test]
async fn test_size_filter_matches_any_selected_size() {
    let ctx = TestContext::with_seed(seed_with_products(vec![
        product_json("sm", "Small Tee", 20_000, &["S", "M"], 1),
        product_json("xl", "Big Tee", 20_000, &["XL"], 2),
    ]))
    .await;

    let (_, body) = ctx.get("/products?sizes=M,L").await;
    assert_eq!(ids(&body), ["sm"]);
}

#[tokio::test]
async fn test_pagination_counts_pages() {
    let products = (1..=5)
        .map(|i| product_json(&format!("p{i}"), &format!("Tee {i}"), 10_000 * i, &[], i))
        .collect();
    let ctx = TestContext::with_seed(seed_with_products(products)).await;

    let (_, first) = ctx.get("/products?pageSize=2&page=1").await;
    assert_eq!(first["totalPages"], 3);
    assert_eq!(first["totalItems"], 5);
    assert_eq!(ids(&first).len(), 2);

    let (_, last) = ctx.get("/products?pageSize=2&page=3").await;
    assert_eq!(ids(&last).len(), 1);

    // Pages past the end are clamped to the last page
    let (_, beyond) = ctx.get("/products?pageSize=2&page=9").await;
    assert_eq!(beyond["page"], 3);
    assert_eq!(ids(&beyond), ids(&last));
}

#[tokio::test]
async fn test_default_sort_is_newest_first() {
    let ctx = TestContext::with_seed(seed_with_products(vec![
        product_json("old", "Old Tee", 10_000, &[], 1),
        product_json("new", "New Tee", 10_000, &[], 9),
        product_json("mid", "Mid Tee", 10_000, &[], 5),
    ]))
    .await;

    let (_, body) = ctx.get("/products").await;
    assert_eq!(ids(&body), ["new", "mid", "old"]);

    let (_, body) = ctx.get("/products?sort=name&order=asc").await;
    assert_eq!(ids(&body), ["mid", "new", "old"]);
}

#[tokio::test]
async fn test_search_and_category_on_embedded_seed() {
    let ctx = TestContext::new().await;

    let (_, body) = ctx.get("/products?search=OXFORD").await;
    assert_eq!(ids(&body), ["p-001"]);

    let (_, body) = ctx.get("/products?category=outerwear&sort=price&order=asc").await;
    assert_eq!(ids(&body), ["p-009", "p-011", "p-010"]);

    let (_, body) = ctx.get("/products?category=outerwear&subCategory=coats").await;
    assert_eq!(ids(&body), ["p-010"]);
}

#[tokio::test]
async fn test_facets() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/products/facets?category=bottoms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["categoryNames"],
        serde_json::json!(["accessories", "bottoms", "outerwear", "shoes", "tops"])
    );
    assert_eq!(
        body["subCategories"],
        serde_json::json!(["denim", "shorts", "skirts", "trousers"])
    );

    let (_, body) = ctx.get("/products/facets").await;
    assert_eq!(body["subCategories"], serde_json::json!([]));
}

#[tokio::test]
async fn test_product_detail_and_not_found() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/products/p-006").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Selvedge Straight Jeans");
    assert_eq!(body["price"], "129000");

    let (status, _) = ctx.get("/products/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_listing_params_are_rejected() {
    let ctx = TestContext::new().await;
    let (status, _) = ctx.get("/products?pageSize=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.get("/products?sort=popularity").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_only_active_categories_are_public() {
    let ctx = TestContext::new().await;
    let (_, before) = ctx.get("/categories").await;
    assert_eq!(before.as_array().map(Vec::len), Some(5));

    let (status, _) = ctx
        .put(
            "/admin/categories/c-005/active",
            &serde_json::json!({ "isActive": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = ctx.get("/categories").await;
    let slugs: Vec<&str> = after
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|c| c["slug"].as_str())
        .collect();
    assert_eq!(slugs, ["tops", "bottoms", "outerwear", "shoes"]);
}
