//! Database operations for the Vendora `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` / `vendor_profiles` - Account profiles for identities resolved
//!   by the upstream auth service
//! - `categories` / `products` - Catalog
//! - `carts` / `cart_items` - One cart per account
//! - `addresses` - Billing/shipping addresses with per-kind defaults
//! - `orders` / `order_items` - Immutable checkout snapshots
//! - `coupons`, `product_reviews`, `notifications`
//!
//! Queries use sqlx's runtime-bound API with `FromRow` row structs; row
//! structs convert into the domain types in [`crate::models`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p vendora-cli -- migrate
//! ```

pub mod addresses;
pub mod carts;
pub mod categories;
pub mod coupons;
pub mod inventory;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use addresses::AddressRepository;
pub use carts::CartRepository;
pub use categories::CategoryRepository;
pub use coupons::CouponRepository;
pub use inventory::{InventoryLedger, ReserveError};
pub use notifications::NotificationRepository;
pub use orders::{NewOrder, OrderRepository, generate_order_number};
pub use products::ProductRepository;
pub use reviews::ReviewRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate slug or sku).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a unique-constraint violation to [`RepositoryError::Conflict`]
    /// with the given message; pass every other error through.
    pub(crate) fn conflict_on_unique(err: sqlx::Error, message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(message.to_owned());
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
