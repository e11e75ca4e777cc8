//! Integration tests for the cart and checkout flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - Seeded demo data (cargo run -p vendora-cli -- seed)
//! - The server running (cargo run -p vendora-server)
//!
//! The demo customer account (ID from the seed data) is used throughout.

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use vendora_integration_tests::{base_url, client_as};

const CUSTOMER_ID: i32 = 3;

fn customer() -> Client {
    client_as(CUSTOMER_ID, "customer")
}

fn shipping_address() -> Value {
    json!({
        "street": "1 Main St",
        "city": "Springfield",
        "state": "IL",
        "zip_code": "62701",
        "country": "US"
    })
}

async fn first_product(client: &Client) -> Value {
    let base_url = base_url();
    let products: Vec<Value> = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("list request")
        .json()
        .await
        .expect("list body");
    products.into_iter().next().expect("seeded product")
}

async fn clear_cart(client: &Client) {
    let base_url = base_url();
    let cart: Value = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("cart request")
        .json()
        .await
        .expect("cart body");

    for item in cart["items"].as_array().expect("items") {
        let id = item["id"].as_i64().expect("item id");
        client
            .delete(format!("{base_url}/cart/items/{id}"))
            .send()
            .await
            .expect("remove request");
    }
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_cart_add_merges_quantities() {
    let client = customer();
    let base_url = base_url();
    clear_cart(&client).await;

    let product = first_product(&client).await;
    let product_id = product["id"].as_i64().expect("id");

    for _ in 0..2 {
        let resp = client
            .post(format!("{base_url}/cart/items"))
            .json(&json!({ "product_id": product_id, "quantity": 1 }))
            .send()
            .await
            .expect("add request");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let cart: Value = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("cart request")
        .json()
        .await
        .expect("cart body");

    let items = cart["items"].as_array().expect("items");
    assert_eq!(items.len(), 1, "same product should merge into one line");
    assert_eq!(items[0]["quantity"], 2);

    clear_cart(&client).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_checkout_empty_cart_is_rejected() {
    let client = customer();
    let base_url = base_url();
    clear_cart(&client).await;

    let resp = client
        .post(format!("{base_url}/orders"))
        .json(&json!({ "shipping_address": shipping_address() }))
        .send()
        .await
        .expect("checkout request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_checkout_creates_order_and_clears_cart() {
    let client = customer();
    let base_url = base_url();
    clear_cart(&client).await;

    let product = first_product(&client).await;
    let product_id = product["id"].as_i64().expect("id");

    client
        .post(format!("{base_url}/cart/items"))
        .json(&json!({ "product_id": product_id, "quantity": 1 }))
        .send()
        .await
        .expect("add request");

    let resp = client
        .post(format!("{base_url}/orders"))
        .json(&json!({
            "shipping_address": shipping_address(),
            "shipping_cost": "5.00"
        }))
        .send()
        .await
        .expect("checkout request");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let order: Value = resp.json().await.expect("order body");
    assert_eq!(order["status"], "pending");
    assert_eq!(order["order_number"].as_str().expect("number").len(), 8);
    assert_eq!(order["items"].as_array().expect("items").len(), 1);

    // The cart is emptied by the same transaction.
    let cart: Value = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("cart request")
        .json()
        .await
        .expect("cart body");
    assert!(cart["items"].as_array().expect("items").is_empty());

    // The order shows up in history.
    let orders: Vec<Value> = client
        .get(format!("{base_url}/orders"))
        .send()
        .await
        .expect("history request")
        .json()
        .await
        .expect("history body");
    assert!(
        orders
            .iter()
            .any(|o| o["order_number"] == order["order_number"])
    );
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_checkout_insufficient_stock_is_conflict() {
    let client = customer();
    let base_url = base_url();
    clear_cart(&client).await;

    let product = first_product(&client).await;
    let product_id = product["id"].as_i64().expect("id");
    let stock = product["stock"].as_i64().expect("stock");

    client
        .post(format!("{base_url}/cart/items"))
        .json(&json!({ "product_id": product_id, "quantity": stock + 1 }))
        .send()
        .await
        .expect("add request");

    let resp = client
        .post(format!("{base_url}/orders"))
        .json(&json!({ "shipping_address": shipping_address() }))
        .send()
        .await
        .expect("checkout request");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // The failed checkout must not touch stock or the cart.
    let after: Value = client
        .get(format!("{base_url}/products/{product_id}"))
        .send()
        .await
        .expect("detail request")
        .json()
        .await
        .expect("detail body");
    assert_eq!(after["stock"].as_i64().expect("stock"), stock);

    let cart: Value = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("cart request")
        .json()
        .await
        .expect("cart body");
    assert_eq!(cart["items"].as_array().expect("items").len(), 1);

    clear_cart(&client).await;
}

/// Order lines snapshot the price paid; later catalog edits must not
/// rewrite history.
#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_order_items_keep_price_snapshot() {
    let client = customer();
    let admin = client_as(1, "admin");
    let base_url = base_url();
    clear_cart(&client).await;

    let product = first_product(&client).await;
    let product_id = product["id"].as_i64().expect("id");
    let charged = if product["discount_price"].is_null() {
        product["price"].as_str().expect("price").to_owned()
    } else {
        product["discount_price"].as_str().expect("price").to_owned()
    };

    client
        .post(format!("{base_url}/cart/items"))
        .json(&json!({ "product_id": product_id, "quantity": 1 }))
        .send()
        .await
        .expect("add request");

    let order: Value = client
        .post(format!("{base_url}/orders"))
        .json(&json!({ "shipping_address": shipping_address() }))
        .send()
        .await
        .expect("checkout request")
        .json()
        .await
        .expect("order body");
    let order_id = order["id"].as_i64().expect("order id");

    // An admin reprices the product after the sale.
    let resp = admin
        .put(format!("{base_url}/products/{product_id}"))
        .json(&json!({ "price": "999.99", "discount_price": null }))
        .send()
        .await
        .expect("reprice request");
    assert_eq!(resp.status(), StatusCode::OK);

    let detail: Value = client
        .get(format!("{base_url}/orders/{order_id}"))
        .send()
        .await
        .expect("detail request")
        .json()
        .await
        .expect("detail body");
    let items = detail["items"].as_array().expect("items");
    assert_eq!(items[0]["price"].as_str().expect("price"), charged);

    // Put the catalog back the way the seed left it.
    let original_price = product["price"].as_str().expect("price");
    let restore = if product["discount_price"].is_null() {
        json!({ "price": original_price, "discount_price": null })
    } else {
        json!({
            "price": original_price,
            "discount_price": product["discount_price"].as_str().expect("price")
        })
    };
    admin
        .put(format!("{base_url}/products/{product_id}"))
        .json(&restore)
        .send()
        .await
        .expect("restore request");
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_coupon_validation() {
    let client = customer();
    let base_url = base_url();

    let valid: Value = client
        .post(format!("{base_url}/coupons/validate"))
        .json(&json!({ "code": "WELCOME10" }))
        .send()
        .await
        .expect("validate request")
        .json()
        .await
        .expect("validate body");
    assert_eq!(valid["valid"], true);

    // A known code outside its validity window is rejected outright.
    let expired = client
        .post(format!("{base_url}/coupons/validate"))
        .json(&json!({ "code": "EXPIRED20" }))
        .send()
        .await
        .expect("validate request");
    assert_eq!(expired.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(format!("{base_url}/coupons/validate"))
        .json(&json!({ "code": "NO-SUCH-CODE" }))
        .send()
        .await
        .expect("validate request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
