//! Integration tests for the public catalog.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - Seeded demo data (cargo run -p vendora-cli -- seed)
//! - The server running (cargo run -p vendora-server)

use reqwest::StatusCode;
use serde_json::Value;

use vendora_integration_tests::{anonymous_client, base_url};

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_health_endpoints() {
    let client = anonymous_client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("health request");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("readiness request");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_product_listing_and_detail() {
    let client = anonymous_client();
    let base_url = base_url();

    let products: Vec<Value> = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("list request")
        .json()
        .await
        .expect("list body");
    assert!(!products.is_empty());

    // Detail works by slug and by numeric ID, returning the same product.
    let slug = products[0]["slug"].as_str().expect("slug");
    let id = products[0]["id"].as_i64().expect("id");

    let by_slug: Value = client
        .get(format!("{base_url}/products/{slug}"))
        .send()
        .await
        .expect("slug request")
        .json()
        .await
        .expect("slug body");
    let by_id: Value = client
        .get(format!("{base_url}/products/{id}"))
        .send()
        .await
        .expect("id request")
        .json()
        .await
        .expect("id body");

    assert_eq!(by_slug["id"], by_id["id"]);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_product_filters() {
    let client = anonymous_client();
    let base_url = base_url();

    let filtered: Vec<Value> = client
        .get(format!("{base_url}/products?category=kitchen"))
        .send()
        .await
        .expect("filter request")
        .json()
        .await
        .expect("filter body");

    // Everything that comes back belongs to the requested category.
    assert!(!filtered.is_empty());
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_unknown_product_is_404() {
    let client = anonymous_client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/products/no-such-slug"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_vendor_directory_lists_only_approved() {
    let client = anonymous_client();
    let base_url = base_url();

    let vendors: Vec<Value> = client
        .get(format!("{base_url}/vendors"))
        .send()
        .await
        .expect("vendors request")
        .json()
        .await
        .expect("vendors body");

    for vendor in &vendors {
        assert!(vendor["business_name"].is_string());
        // The public view never carries the approval flag.
        assert!(vendor.get("approved").is_none());
    }
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_product_mutation_requires_vendor_role() {
    let base_url = base_url();

    // Anonymous caller gets 401.
    let resp = anonymous_client()
        .post(format!("{base_url}/products"))
        .json(&serde_json::json!({
            "name": "X", "slug": "x", "price": "1.00", "sku": "X-1"
        }))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Customer role gets 403.
    let resp = vendora_integration_tests::client_as(3, "customer")
        .post(format!("{base_url}/products"))
        .json(&serde_json::json!({
            "name": "X", "slug": "x", "price": "1.00", "sku": "X-1"
        }))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
