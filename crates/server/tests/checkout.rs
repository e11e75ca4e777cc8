//! Database-level tests for the checkout transaction.
//!
//! These tests require a running `PostgreSQL` database with migrations
//! applied; they create their own fixture rows and clean up after
//! themselves.
//!
//! Run with: cargo test -p vendora-server -- --ignored

use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::PgPool;

use vendora_core::{AddressKind, OrderNumber, ProductId, UserId};
use vendora_server::db::{self, AddressRepository, CartRepository, NewOrder, OrderRepository};
use vendora_server::models::address::AddressInput;
use vendora_server::models::order::CheckoutRequest;
use vendora_server::services::{CheckoutError, CheckoutService};

async fn pool() -> PgPool {
    let url = std::env::var("VENDORA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .expect("database URL for tests");
    db::create_pool(&url).await.expect("pool")
}

async fn insert_user(pool: &PgPool, slug: &str, role: &str) -> UserId {
    let (id,): (UserId,) = sqlx::query_as(
        "INSERT INTO users (email, name, role) VALUES ($1, 'Test Account', $2) RETURNING id",
    )
    .bind(format!("{slug}-{role}@test.invalid"))
    .bind(role)
    .fetch_one(pool)
    .await
    .expect("insert user");
    id
}

async fn insert_product(pool: &PgPool, vendor_id: UserId, slug: &str, stock: i32) -> ProductId {
    let (id,): (ProductId,) = sqlx::query_as(
        r"
        INSERT INTO products (vendor_id, name, slug, price, stock, sku)
        VALUES ($1, $2, $3, 20.00, $4, $5)
        RETURNING id
        ",
    )
    .bind(vendor_id)
    .bind(slug)
    .bind(slug)
    .bind(stock)
    .bind(format!("SKU-{slug}"))
    .fetch_one(pool)
    .await
    .expect("insert product");
    id
}

async fn stock_of(pool: &PgPool, id: ProductId) -> i32 {
    let (stock,): (i32,) = sqlx::query_as("SELECT stock FROM products WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("read stock");
    stock
}

async fn order_count(pool: &PgPool, user_id: UserId) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT count(*) FROM orders WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("count orders");
    count
}

fn shipping_input() -> AddressInput {
    AddressInput {
        street: "1 Main St".to_owned(),
        city: "Springfield".to_owned(),
        state: "IL".to_owned(),
        zip_code: "62701".to_owned(),
        country: "US".to_owned(),
        default: false,
    }
}

fn checkout_request() -> CheckoutRequest {
    CheckoutRequest {
        shipping_address: shipping_input(),
        billing_address: None,
        same_billing_address: true,
        shipping_cost: Decimal::ZERO,
        payment_method: "credit".to_owned(),
    }
}

// orders.user_id has no cascade, so orders go first; everything else
// cascades off the users.
async fn cleanup(pool: &PgPool, slug: &str) {
    sqlx::query(
        r"
        DELETE FROM orders
        WHERE user_id IN (SELECT id FROM users WHERE email LIKE $1)
        ",
    )
    .bind(format!("{slug}-%@test.invalid"))
    .execute(pool)
    .await
    .expect("cleanup orders");

    sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("{slug}-%@test.invalid"))
        .execute(pool)
        .await
        .expect("cleanup users");
}

/// Two simultaneous checkouts of one cart: the cart lines are consumed
/// exactly once, so the loser fails with `EmptyCart` and neither the
/// order count nor the stock reflects a double sale.
#[tokio::test]
#[ignore = "Requires a PostgreSQL database with migrations applied"]
async fn test_concurrent_checkouts_consume_cart_once() {
    let pool = pool().await;
    let slug = "checkout-race";
    let vendor = insert_user(&pool, slug, "vendor").await;
    let customer = insert_user(&pool, slug, "customer").await;
    let product = insert_product(&pool, vendor, slug, 10).await;

    let cart = CartRepository::new(&pool)
        .get_or_create(customer)
        .await
        .expect("cart");
    CartRepository::new(&pool)
        .add_item(cart.id, product, 3)
        .await
        .expect("add item");

    let mut tasks = Vec::new();
    for _ in 0..2 {
        let pool = pool.clone();
        tasks.push(tokio::spawn(async move {
            CheckoutService::new(&pool)
                .checkout(customer, &checkout_request())
                .await
        }));
    }

    let mut successes = 0;
    let mut empty_carts = 0;
    for task in tasks {
        match task.await.expect("join") {
            Ok(_) => successes += 1,
            Err(CheckoutError::EmptyCart) => empty_carts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 1, "exactly one checkout may win the cart");
    assert_eq!(empty_carts, 1, "the loser must see the emptied cart");
    assert_eq!(order_count(&pool, customer).await, 1);
    assert_eq!(stock_of(&pool, product).await, 7);

    cleanup(&pool, slug).await;
}

/// An order-number collision is absorbed by regenerating the number, not
/// surfaced to the caller.
#[tokio::test]
#[ignore = "Requires a PostgreSQL database with migrations applied"]
async fn test_order_number_collision_regenerates() {
    let pool = pool().await;
    let slug = "checkout-number";
    let customer = insert_user(&pool, slug, "customer").await;
    let address = AddressRepository::new(&pool)
        .create(customer, AddressKind::Shipping, &shipping_input())
        .await
        .expect("address");
    let taken = OrderNumber::parse("REGEN001").expect("order number");

    let new_order = |number: OrderNumber| NewOrder {
        user_id: customer,
        order_number: number,
        shipping_address_id: address.id,
        billing_address_id: address.id,
        shipping_cost: Decimal::ZERO,
        total: Decimal::ZERO,
        payment_method: "credit".to_owned(),
    };

    let mut tx = pool.begin().await.expect("tx");
    let first = OrderRepository::insert_allocating_in(&mut *tx, new_order(taken.clone()))
        .await
        .expect("first insert");
    assert_eq!(first.order_number, taken);

    let second = OrderRepository::insert_allocating_in(&mut *tx, new_order(taken.clone()))
        .await
        .expect("second insert must retry, not fail");
    assert_ne!(second.order_number, taken);
    tx.commit().await.expect("commit");

    assert_eq!(order_count(&pool, customer).await, 2);
    cleanup(&pool, slug).await;
}
