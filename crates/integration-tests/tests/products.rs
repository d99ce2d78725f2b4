//! Integration tests for the product screens.

#![allow(clippy::unwrap_used)]

use ims_integration_tests::{TestContext, location};
use reqwest::StatusCode;

async fn product_name(ctx: &TestContext, id: i64) -> Option<String> {
    sqlx::query_scalar("SELECT name FROM product WHERE id = ?")
        .bind(id)
        .fetch_optional(&ctx.pool)
        .await
        .unwrap()
}

fn add_form<'a>(
    name: &'a str,
    quantity: &'a str,
    price: &'a str,
) -> [(&'static str, &'a str); 4] {
    [
        ("name", name),
        ("description", "added by a test"),
        ("quantity_available", quantity),
        ("price", price),
    ]
}

#[tokio::test]
async fn test_products_listed_by_price_descending() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx.get("/products").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();

    let saw = body.find("Circular Saw").unwrap();
    let drill = body.find("Cordless Drill").unwrap();
    let glasses = body.find("Safety Glasses").unwrap();
    assert!(saw < drill && drill < glasses);
    assert!(body.contains("$129.00"));
    assert!(body.contains(r#"action="/products/add""#));
}

#[tokio::test]
async fn test_add_product() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .post_form("/products/add", &add_form("  Level  ", "5.0", "19.5"))
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/products"));

    let (name, quantity, price): (String, i64, f64) = sqlx::query_as(
        "SELECT name, quantity_available, price FROM product ORDER BY id DESC LIMIT 1",
    )
    .fetch_one(&ctx.pool)
    .await
    .unwrap();
    assert_eq!(name, "Level");
    assert_eq!(quantity, 5);
    assert!((price - 19.5).abs() < f64::EPSILON);
    assert_eq!(ctx.product_count().await, 9);
}

#[tokio::test]
async fn test_add_product_rejects_negative_values() {
    let ctx = TestContext::logged_in().await;

    for (quantity, price) in [("-1", "1"), ("1", "-1")] {
        let resp = ctx
            .post_form("/products/add", &add_form("Level", quantity, price))
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.text().await.unwrap(),
            "quantity and/or price was less than 0"
        );
    }

    assert_eq!(ctx.product_count().await, 8);
}

#[tokio::test]
async fn test_add_product_rejects_empty_name() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .post_form("/products/add", &add_form("   ", "1", "1"))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "name must be provided");
    assert_eq!(ctx.product_count().await, 8);
}

#[tokio::test]
async fn test_add_product_rejects_missing_and_malformed_fields() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .post_form("/products/add", &[("name", "Level"), ("price", "1")])
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.text().await.unwrap(),
        "One or more required fields were not provided"
    );

    let resp = ctx
        .post_form("/products/add", &add_form("Level", "many", "1"))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.text().await.unwrap(),
        "invalid quantity_available: 'many'"
    );

    assert_eq!(ctx.product_count().await, 8);
}

#[tokio::test]
async fn test_add_product_rejects_oversized_values() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .post_form(
            "/products/add",
            &add_form("Yacht", "1", "79228162514264337593543950335"),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.text().await.unwrap(),
        "price must not exceed 1000000000"
    );

    let resp = ctx
        .post_form(
            "/products/add",
            &add_form("Nails", "9223372036854775807", "1"),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.text().await.unwrap(),
        "quantity_available must not exceed 4294967295"
    );

    assert_eq!(ctx.product_count().await, 8);
}

#[tokio::test]
async fn test_largest_values_keep_pages_working() {
    let ctx = TestContext::logged_in().await;

    for name in ["Crate A", "Crate B"] {
        let resp = ctx
            .post_form("/products/add", &add_form(name, "4294967295", "1000000000"))
            .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }

    assert_eq!(ctx.get("/products").await.status(), StatusCode::OK);
    assert_eq!(ctx.get("/dashboard").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_add_product_rounds_price_to_cents() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .post_form("/products/add", &add_form("Washer", "10", "0.005"))
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let price: f64 = sqlx::query_scalar("SELECT price FROM product WHERE name = 'Washer'")
        .fetch_one(&ctx.pool)
        .await
        .unwrap();
    assert!((price - 0.01).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_non_numeric_ids_are_not_found() {
    let ctx = TestContext::logged_in().await;

    for path in ["/products/edit/abc", "/delete-product/abc", "/delete-customer/1x"] {
        assert_eq!(ctx.get(path).await.status(), StatusCode::NOT_FOUND, "{path}");
    }
    assert_eq!(ctx.product_count().await, 8);
    assert_eq!(ctx.customer_count().await, 7);
}

#[tokio::test]
async fn test_add_product_requires_login() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_form("/products/add", &add_form("Level", "1", "1"))
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/"));
    assert_eq!(ctx.product_count().await, 8);
}

#[tokio::test]
async fn test_edit_page_renders_form_for_one_row() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx.get("/products/edit/2").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains(r#"action="/products/edit/submit""#));
    assert!(body.contains(r#"name="id" type="hidden" value="2""#));
    assert!(body.contains(r#"value="14.50""#));
    assert_eq!(body.matches(r#"name="id""#).count(), 1);
}

#[tokio::test]
async fn test_edit_submit_updates_row() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .post_form(
            "/products/edit/submit",
            &[
                ("id", "3"),
                ("name", "Tape Measure 30ft"),
                ("description", "30 ft"),
                ("quantity_available", "60"),
                ("price", "12.99"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/products"));

    assert_eq!(
        product_name(&ctx, 3).await.as_deref(),
        Some("Tape Measure 30ft")
    );
    assert_eq!(ctx.product_count().await, 8);
}

#[tokio::test]
async fn test_edit_submit_unknown_id_is_not_found() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .post_form(
            "/products/edit/submit",
            &[
                ("id", "999"),
                ("name", "Ghost"),
                ("quantity_available", "1"),
                ("price", "1"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(ctx.product_count().await, 8);
}

#[tokio::test]
async fn test_edit_submit_rejects_negative_id() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx
        .post_form(
            "/products/edit/submit",
            &[
                ("id", "-3"),
                ("name", "Tape Measure"),
                ("quantity_available", "1"),
                ("price", "1"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.text().await.unwrap(),
        "At least one of id, quantity, or price was less than 0"
    );
    assert_eq!(product_name(&ctx, 3).await.as_deref(), Some("Tape Measure"));
}

#[tokio::test]
async fn test_delete_product_removes_exactly_that_id() {
    let ctx = TestContext::logged_in().await;

    let resp = ctx.get("/delete-product/2").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/products"));

    assert_eq!(product_name(&ctx, 2).await, None);
    assert_eq!(product_name(&ctx, 1).await.as_deref(), Some("Cordless Drill"));
    assert_eq!(product_name(&ctx, 3).await.as_deref(), Some("Tape Measure"));
    assert_eq!(ctx.product_count().await, 7);

    // Deleting again is a no-op.
    let resp = ctx.get("/delete-product/2").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(ctx.product_count().await, 7);
}

#[tokio::test]
async fn test_dashboard_summarizes_inventory() {
    let ctx = TestContext::logged_in().await;

    let body = ctx.get("/dashboard").await.text().await.unwrap();
    assert!(body.contains("Out of stock"));
    assert!(body.contains("Stock value"));
    // 8 products, 560 units.
    assert!(body.contains(">8<"));
    assert!(body.contains(">560<"));
}
