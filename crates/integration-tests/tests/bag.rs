//! Integration tests for the cart, wishlist and checkout.

use reqwest::StatusCode;
use serde_json::{Value, json};
use threadline_integration_tests::{TestContext, checkout_body};

async fn add_line(
    ctx: &TestContext,
    product_id: &str,
    size: &str,
    color: &str,
    quantity: u32,
) -> (StatusCode, Value) {
    ctx.post(
        "/cart/items",
        &json!({
            "productId": product_id,
            "size": size,
            "color": color,
            "quantity": quantity,
        }),
    )
    .await
}

#[tokio::test]
async fn test_cart_lines_and_totals() {
    let ctx = TestContext::new().await;

    let (status, first) = add_line(&ctx, "p-001", "M", "white", 2).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["name"], "Relaxed Oxford Shirt");
    assert_eq!(first["price"], "49000");

    // The same variant again is a separate line
    let (status, second) = add_line(&ctx, "p-001", "M", "white", 1).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(first["id"], second["id"]);

    let (status, cart) = ctx.get("/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(cart["itemCount"], 3);
    assert_eq!(cart["total"], "147000");
}

#[tokio::test]
async fn test_cart_add_is_validated() {
    let ctx = TestContext::new().await;

    let (status, _) = add_line(&ctx, "p-001", "M", "white", 0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // p-001 has 24 in stock
    let (status, _) = add_line(&ctx, "p-001", "M", "white", 25).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = add_line(&ctx, "p-001", "XXS", "white", 1).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // p-011 is sold out
    let (status, _) = add_line(&ctx, "p-011", "M", "black", 1).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = add_line(&ctx, "p-999", "M", "white", 1).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, cart) = ctx.get("/cart").await;
    assert_eq!(cart["itemCount"], 0);
    assert_eq!(cart["total"], "0");
}

#[tokio::test]
async fn test_cart_update_and_remove() {
    let ctx = TestContext::new().await;
    let (_, line) = add_line(&ctx, "p-002", "S", "olive", 1).await;
    let id = line["id"].as_str().expect("line id").to_string();

    let (status, updated) = ctx
        .patch(&format!("/cart/items/{id}"), &json!({ "quantity": 3, "size": "L" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 3);
    assert_eq!(updated["size"], "L");

    let (status, _) = ctx
        .patch(&format!("/cart/items/{id}"), &json!({ "quantity": 0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // p-002 comes in S, M and L, and black, white and olive
    let (status, _) = ctx
        .patch(&format!("/cart/items/{id}"), &json!({ "size": "XXS" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = ctx
        .patch(&format!("/cart/items/{id}"), &json!({ "color": "pink" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, cart) = ctx.get("/cart").await;
    assert_eq!(cart["total"], "57000");

    assert_eq!(ctx.delete(&format!("/cart/items/{id}")).await, StatusCode::NO_CONTENT);
    assert_eq!(ctx.delete(&format!("/cart/items/{id}")).await, StatusCode::NOT_FOUND);

    add_line(&ctx, "p-002", "S", "olive", 1).await;
    add_line(&ctx, "p-003", "M", "navy", 1).await;
    assert_eq!(ctx.delete("/cart").await, StatusCode::NO_CONTENT);
    let (_, cart) = ctx.get("/cart").await;
    assert_eq!(cart["items"], json!([]));
}

#[tokio::test]
async fn test_wishlist_holds_each_product_once() {
    let ctx = TestContext::new().await;

    let (status, first) = ctx.post("/wishlist/items", &json!({ "productId": "p-003" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, again) = ctx.post("/wishlist/items", &json!({ "productId": "p-003" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], again["id"]);

    let (_, list) = ctx.get("/wishlist").await;
    assert_eq!(list["count"], 1);

    let (_, membership) = ctx.get("/wishlist/products/p-003").await;
    assert_eq!(membership["inWishlist"], true);
    let (_, membership) = ctx.get("/wishlist/products/p-004").await;
    assert_eq!(membership["inWishlist"], false);

    let (status, _) = ctx.post("/wishlist/items", &json!({ "productId": "p-999" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(ctx.delete("/wishlist/products/p-003").await, StatusCode::NO_CONTENT);
    assert_eq!(ctx.delete("/wishlist/products/p-003").await, StatusCode::NOT_FOUND);

    let (_, entry) = ctx.post("/wishlist/items", &json!({ "productId": "p-005" })).await;
    let id = entry["id"].as_str().expect("entry id");
    assert_eq!(ctx.delete(&format!("/wishlist/items/{id}")).await, StatusCode::NO_CONTENT);

    ctx.post("/wishlist/items", &json!({ "productId": "p-006" })).await;
    assert_eq!(ctx.delete("/wishlist").await, StatusCode::NO_CONTENT);
    let (_, list) = ctx.get("/wishlist").await;
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn test_checkout_turns_cart_into_order() {
    let ctx = TestContext::new().await;
    add_line(&ctx, "p-001", "L", "blue", 2).await;

    let (status, order) = ctx.post("/checkout", &checkout_body(Some("welcome10"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["subtotal"], "98000");
    assert_eq!(order["shippingFee"], "0");
    assert_eq!(order["discount"], "9800");
    assert_eq!(order["totalAmount"], "88200");
    assert_eq!(order["couponCode"], "WELCOME10");

    let (_, cart) = ctx.get("/cart").await;
    assert_eq!(cart["itemCount"], 0);

    let id = order["id"].as_str().expect("order id");
    let (status, detail) = ctx.get(&format!("/admin/orders/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["products"][0]["id"], "p-001");
}

#[tokio::test]
async fn test_checkout_charges_shipping_below_threshold() {
    let ctx = TestContext::new().await;
    add_line(&ctx, "p-002", "M", "black", 1).await;

    let (status, order) = ctx.post("/checkout", &checkout_body(None)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["shippingFee"], "3000");
    assert_eq!(order["totalAmount"], "22000");
}

#[tokio::test]
async fn test_failed_checkout_keeps_cart() {
    let ctx = TestContext::new().await;

    let (status, _) = ctx.post("/checkout", &checkout_body(None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    add_line(&ctx, "p-002", "M", "black", 1).await;
    // Under the WELCOME10 minimum
    let (status, _) = ctx.post("/checkout", &checkout_body(Some("WELCOME10"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, cart) = ctx.get("/cart").await;
    assert_eq!(cart["itemCount"], 1);
}

#[tokio::test]
async fn test_coupon_preview() {
    let ctx = TestContext::new().await;
    add_line(&ctx, "p-003", "M", "navy", 1).await;

    let (status, preview) = ctx.post("/cart/coupon", &json!({ "code": " save5000 " })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["code"], "SAVE5000");
    assert_eq!(preview["subtotal"], "89000");
    assert_eq!(preview["discount"], "5000");

    let (status, _) = ctx.post("/cart/coupon", &json!({ "code": "WINTER20" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.post("/cart/coupon", &json!({ "code": "NOPE" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
