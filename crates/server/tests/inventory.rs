//! Database-level tests for stock reservation.
//!
//! These tests require a running `PostgreSQL` database with migrations
//! applied; they create their own fixture rows and clean up after
//! themselves.
//!
//! Run with: cargo test -p vendora-server -- --ignored

use secrecy::SecretString;
use sqlx::PgPool;

use vendora_core::ProductId;
use vendora_server::db::{self, InventoryLedger, ReserveError};

async fn pool() -> PgPool {
    let url = std::env::var("VENDORA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .expect("database URL for tests");
    db::create_pool(&url).await.expect("pool")
}

async fn insert_product(pool: &PgPool, slug: &str, stock: i32) -> ProductId {
    let (vendor_id,): (i32,) = sqlx::query_as(
        "INSERT INTO users (email, name, role) VALUES ($1, 'Test Vendor', 'vendor') RETURNING id",
    )
    .bind(format!("{slug}@test.invalid"))
    .fetch_one(pool)
    .await
    .expect("insert vendor");

    let (id,): (ProductId,) = sqlx::query_as(
        r"
        INSERT INTO products (vendor_id, name, slug, price, stock, sku)
        VALUES ($1, $2, $3, 10.00, $4, $5)
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

async fn cleanup(pool: &PgPool, slug: &str) {
    sqlx::query("DELETE FROM products WHERE slug = $1")
        .bind(slug)
        .execute(pool)
        .await
        .expect("cleanup product");
    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(format!("{slug}@test.invalid"))
        .execute(pool)
        .await
        .expect("cleanup user");
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database with migrations applied"]
async fn test_reserve_decrements_stock() {
    let pool = pool().await;
    let id = insert_product(&pool, "reserve-decrements", 10).await;

    let mut conn = pool.acquire().await.expect("conn");
    InventoryLedger::reserve(&mut conn, id, 4)
        .await
        .expect("reserve");
    drop(conn);

    assert_eq!(stock_of(&pool, id).await, 6);
    cleanup(&pool, "reserve-decrements").await;
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database with migrations applied"]
async fn test_reserve_rejects_oversell_without_touching_stock() {
    let pool = pool().await;
    let id = insert_product(&pool, "reserve-oversell", 3).await;

    let mut conn = pool.acquire().await.expect("conn");
    let err = InventoryLedger::reserve(&mut conn, id, 5)
        .await
        .expect_err("oversell must fail");
    drop(conn);

    match err {
        ReserveError::InsufficientStock {
            product_id,
            available,
        } => {
            assert_eq!(product_id, id);
            assert_eq!(available, 3);
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(stock_of(&pool, id).await, 3);
    cleanup(&pool, "reserve-oversell").await;
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database with migrations applied"]
async fn test_reserve_reports_missing_product() {
    let pool = pool().await;

    let mut conn = pool.acquire().await.expect("conn");
    let err = InventoryLedger::reserve(&mut conn, ProductId::new(i32::MAX), 1)
        .await
        .expect_err("missing product must fail");

    assert!(matches!(err, ReserveError::ProductMissing(_)));
}

/// Two buyers race for the last units; the database arbitrates and at most
/// the available stock is ever sold.
#[tokio::test]
#[ignore = "Requires a PostgreSQL database with migrations applied"]
async fn test_concurrent_reserves_never_oversell() {
    let pool = pool().await;
    let id = insert_product(&pool, "reserve-race", 5).await;

    let mut tasks = Vec::new();
    for _ in 0..4 {
        let pool = pool.clone();
        tasks.push(tokio::spawn(async move {
            let mut conn = pool.acquire().await.expect("conn");
            InventoryLedger::reserve(&mut conn, id, 2).await.is_ok()
        }));
    }

    let mut successes = 0;
    for task in tasks {
        if task.await.expect("join") {
            successes += 1;
        }
    }

    // 4 buyers wanted 2 units each from a stock of 5: exactly 2 can win.
    assert_eq!(successes, 2);
    assert_eq!(stock_of(&pool, id).await, 1);

    cleanup(&pool, "reserve-race").await;
}
