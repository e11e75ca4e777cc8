//! The inventory ledger: atomic stock reservation.
//!
//! Stock is a plain counter on the product row, but the only code allowed
//! to decrement it is [`InventoryLedger::reserve`]. The check and the
//! decrement are a single conditional UPDATE, so two concurrent
//! reservations against the same product serialize on the row lock and can
//! never jointly overdraw it; the CHECK constraint on the column is a
//! last-resort backstop, not the mechanism.
//!
//! Reservation runs on whatever connection the caller provides. Checkout
//! passes its open transaction, which makes the decrement roll back with
//! everything else if any later step fails.

use sqlx::PgConnection;
use thiserror::Error;
use tracing::instrument;

use vendora_core::ProductId;

/// Errors from a reservation attempt.
#[derive(Debug, Error)]
pub enum ReserveError {
    /// Not enough stock; `available` is the quantity on hand at the time
    /// of the attempt. The caller decides whether to abort the whole
    /// order; the ledger never retries.
    #[error("insufficient stock for product {product_id}: {available} available")]
    InsufficientStock {
        /// Product that could not be reserved.
        product_id: ProductId,
        /// Units currently on hand.
        available: i32,
    },

    /// The product row disappeared between cart read and reservation.
    #[error("product {0} no longer exists")]
    ProductMissing(ProductId),

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Owner of the stock counters.
pub struct InventoryLedger;

impl InventoryLedger {
    /// Reserve `quantity` units of a product: decrement its stock if and
    /// only if at least that much is on hand.
    ///
    /// The conditional UPDATE is one statement, so the availability check
    /// and the decrement are atomic with respect to concurrent
    /// reservations of the same product. Stock can never go negative.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError::InsufficientStock`] when fewer than
    /// `quantity` units are on hand, [`ReserveError::ProductMissing`] if
    /// the product row is gone, or [`ReserveError::Database`] on query
    /// failure.
    #[instrument(skip(conn))]
    pub async fn reserve(
        conn: &mut PgConnection,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), ReserveError> {
        let result = sqlx::query(
            r"
            UPDATE products
            SET stock = stock - $2, updated_at = now()
            WHERE id = $1 AND stock >= $2
            ",
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // The conditional update matched nothing: either the product is
        // gone or there is not enough stock. Re-read to tell the two apart
        // and report availability.
        let available: Option<(i32,)> = sqlx::query_as("SELECT stock FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await?;

        match available {
            Some((available,)) => Err(ReserveError::InsufficientStock {
                product_id,
                available,
            }),
            None => Err(ReserveError::ProductMissing(product_id)),
        }
    }
}
