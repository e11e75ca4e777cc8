//! Database-level tests for saved-address defaults.
//!
//! These tests require a running `PostgreSQL` database with migrations
//! applied; they create their own fixture rows and clean up after
//! themselves.
//!
//! Run with: cargo test -p vendora-server -- --ignored

use secrecy::SecretString;
use sqlx::PgPool;

use vendora_core::{AddressKind, UserId};
use vendora_server::db::{self, AddressRepository};
use vendora_server::models::address::AddressInput;

async fn pool() -> PgPool {
    let url = std::env::var("VENDORA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .expect("database URL for tests");
    db::create_pool(&url).await.expect("pool")
}

async fn insert_user(pool: &PgPool, slug: &str) -> UserId {
    let (id,): (UserId,) = sqlx::query_as(
        "INSERT INTO users (email, name, role) VALUES ($1, 'Test Account', 'customer') RETURNING id",
    )
    .bind(format!("{slug}@test.invalid"))
    .fetch_one(pool)
    .await
    .expect("insert user");
    id
}

async fn cleanup(pool: &PgPool, slug: &str) {
    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(format!("{slug}@test.invalid"))
        .execute(pool)
        .await
        .expect("cleanup user");
}

fn input(street: &str, default: bool) -> AddressInput {
    AddressInput {
        street: street.to_owned(),
        city: "Springfield".to_owned(),
        state: "IL".to_owned(),
        zip_code: "62701".to_owned(),
        country: "US".to_owned(),
        default,
    }
}

/// Saving a second default shipping address demotes the first: at most one
/// address per (account, kind) carries the flag.
#[tokio::test]
#[ignore = "Requires a PostgreSQL database with migrations applied"]
async fn test_new_default_address_demotes_previous() {
    let pool = pool().await;
    let slug = "address-default";
    let user = insert_user(&pool, slug).await;
    let repo = AddressRepository::new(&pool);

    let first = repo
        .create(user, AddressKind::Shipping, &input("1 First St", true))
        .await
        .expect("first address");
    assert!(first.is_default);

    let second = repo
        .create(user, AddressKind::Shipping, &input("2 Second St", true))
        .await
        .expect("second address");
    assert!(second.is_default);

    let addresses = repo.list_for_user(user).await.expect("list");
    let defaults: Vec<_> = addresses.iter().filter(|a| a.is_default).collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].id, second.id);

    cleanup(&pool, slug).await;
}

/// Promoting an existing address via update clears the current default.
#[tokio::test]
#[ignore = "Requires a PostgreSQL database with migrations applied"]
async fn test_update_to_default_demotes_previous() {
    let pool = pool().await;
    let slug = "address-promote";
    let user = insert_user(&pool, slug).await;
    let repo = AddressRepository::new(&pool);

    let first = repo
        .create(user, AddressKind::Shipping, &input("1 First St", false))
        .await
        .expect("first address");
    let second = repo
        .create(user, AddressKind::Shipping, &input("2 Second St", true))
        .await
        .expect("second address");

    let promoted = repo
        .update(user, first.id, &input("1 First St", true))
        .await
        .expect("promote");
    assert!(promoted.is_default);

    let demoted = repo.get(user, second.id).await.expect("get");
    assert!(!demoted.is_default);

    cleanup(&pool, slug).await;
}

/// Shipping and billing defaults are independent of each other.
#[tokio::test]
#[ignore = "Requires a PostgreSQL database with migrations applied"]
async fn test_default_is_scoped_to_kind() {
    let pool = pool().await;
    let slug = "address-kinds";
    let user = insert_user(&pool, slug).await;
    let repo = AddressRepository::new(&pool);

    let shipping = repo
        .create(user, AddressKind::Shipping, &input("1 Ship St", true))
        .await
        .expect("shipping address");
    let billing = repo
        .create(user, AddressKind::Billing, &input("2 Bill St", true))
        .await
        .expect("billing address");

    let shipping = repo.get(user, shipping.id).await.expect("get shipping");
    let billing = repo.get(user, billing.id).await.expect("get billing");
    assert!(shipping.is_default);
    assert!(billing.is_default);

    cleanup(&pool, slug).await;
}
