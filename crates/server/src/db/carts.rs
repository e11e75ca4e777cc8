//! Database operations for shopping carts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use vendora_core::{CartId, CartItemId, ProductId, UserId};

use super::RepositoryError;
use crate::models::cart::{Cart, CartItemDetail};

#[derive(Debug, sqlx::FromRow)]
struct CartRow {
    id: CartId,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CartItemJoinRow {
    id: CartItemId,
    product_id: ProductId,
    product_name: String,
    unit_price: Decimal,
    quantity: i32,
}

impl From<CartItemJoinRow> for CartItemDetail {
    fn from(row: CartItemJoinRow) -> Self {
        Self::new(
            row.id,
            row.product_id,
            row.product_name,
            row.unit_price,
            row.quantity,
        )
    }
}

/// Repository for cart database operations.
///
/// Each user has at most one cart, created lazily on first use.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the user's cart, creating it if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        let row: CartRow = sqlx::query_as(
            r"
            INSERT INTO carts (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET updated_at = carts.updated_at
            RETURNING id, user_id, created_at, updated_at
            ",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Add a product to the cart. If the product is already in the cart the
    /// quantities are merged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO cart_items (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Set the quantity of a cart item. Scoped to the cart so users can only
    /// touch their own items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item isn't in the cart.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_item(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE cart_items SET quantity = $3 WHERE id = $2 AND cart_id = $1",
        )
        .bind(cart_id)
        .bind(item_id)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Remove an item from the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item isn't in the cart.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn remove_item(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $2 AND cart_id = $1")
            .bind(cart_id)
            .bind(item_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// List the cart's items joined with their product's current name, price
    /// and stock. Ordered by insertion (item id).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, cart_id: CartId) -> Result<Vec<CartItemDetail>, RepositoryError> {
        let rows: Vec<CartItemJoinRow> = sqlx::query_as(
            r"
            SELECT
                ci.id,
                ci.product_id,
                p.name AS product_name,
                COALESCE(p.discount_price, p.price) AS unit_price,
                ci.quantity
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY ci.id
            ",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Same as [`Self::items`] but inside a caller-held transaction, with
    /// the cart lines row-locked (`FOR UPDATE`).
    ///
    /// The lock is what makes checkout consume a cart exactly once: a
    /// concurrent transaction reading the same cart blocks here until the
    /// first one commits its `DELETE`, at which point the locked rows are
    /// gone and the read comes back empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items_locked_in(
        conn: &mut PgConnection,
        cart_id: CartId,
    ) -> Result<Vec<CartItemDetail>, RepositoryError> {
        let rows: Vec<CartItemJoinRow> = sqlx::query_as(
            r"
            SELECT
                ci.id,
                ci.product_id,
                p.name AS product_name,
                COALESCE(p.discount_price, p.price) AS unit_price,
                ci.quantity
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY ci.id
            FOR UPDATE OF ci
            ",
        )
        .bind(cart_id)
        .fetch_all(conn)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Delete every item in the cart. Runs inside a caller-held transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear_in(
        conn: &mut PgConnection,
        cart_id: CartId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(conn)
            .await?;

        Ok(())
    }
}
