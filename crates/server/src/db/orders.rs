//! Database operations for orders.
//!
//! Order and order-item inserts run inside the checkout transaction, so the
//! write methods here take a `&mut PgConnection` from a caller-held
//! transaction rather than the pool.

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::{Connection, PgConnection, PgPool};

use vendora_core::{
    AddressId, OrderId, OrderItemId, OrderNumber, OrderStatus, ProductId, UserId,
};

use super::RepositoryError;
use crate::models::order::{Order, OrderItem, OrderWithItems};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    order_number: OrderNumber,
    status: OrderStatus,
    shipping_address_id: Option<AddressId>,
    billing_address_id: Option<AddressId>,
    shipping_cost: Decimal,
    total: Decimal,
    payment_method: String,
    paid: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            order_number: row.order_number,
            status: row.status,
            shipping_address_id: row.shipping_address_id,
            billing_address_id: row.billing_address_id,
            shipping_cost: row.shipping_cost,
            total: row.total,
            payment_method: row.payment_method,
            paid: row.paid,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: OrderItemId,
    order_id: OrderId,
    product_id: Option<ProductId>,
    product_name: String,
    price: Decimal,
    quantity: i32,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: row.id,
            order_id: row.order_id,
            product_id: row.product_id,
            product_name: row.product_name,
            price: row.price,
            quantity: row.quantity,
        }
    }
}

const ORDER_COLUMNS: &str = r"
    id, user_id, order_number, status, shipping_address_id, billing_address_id,
    shipping_cost, total, payment_method, paid, created_at, updated_at
";

/// How often [`OrderRepository::insert_allocating_in`] regenerates the
/// order number on collision before giving up.
const ORDER_NUMBER_ATTEMPTS: u32 = 10;

/// Generate a random order number from the order-number alphabet.
#[must_use]
pub fn generate_order_number() -> OrderNumber {
    let mut rng = rand::rng();
    let token: String = (0..OrderNumber::LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..OrderNumber::ALPHABET.len());
            char::from(OrderNumber::ALPHABET[idx])
        })
        .collect();

    // The token is built from the order-number alphabet, so parsing can't
    // fail; fall back to re-parsing a fixed token to keep this panic-free.
    OrderNumber::parse(&token).unwrap_or_else(|_| unreachable!("token built from alphabet"))
}

/// Fields for creating a new order inside the checkout transaction.
#[derive(Debug)]
pub struct NewOrder {
    pub user_id: UserId,
    pub order_number: OrderNumber,
    pub shipping_address_id: AddressId,
    pub billing_address_id: AddressId,
    pub shipping_cost: Decimal,
    pub total: Decimal,
    pub payment_method: String,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order inside a caller-held transaction, regenerating the
    /// order number as long as it collides with an existing one.
    ///
    /// Each attempt runs under a savepoint so a unique violation doesn't
    /// poison the caller's transaction. A collision is never surfaced; only
    /// exhausting every attempt is.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if no free order number was found
    /// after every attempt.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert_allocating_in(
        conn: &mut PgConnection,
        mut order: NewOrder,
    ) -> Result<Order, RepositoryError> {
        for _ in 0..ORDER_NUMBER_ATTEMPTS {
            let mut sp = conn.begin().await?;
            match Self::insert_in(&mut *sp, &order).await {
                Ok(created) => {
                    sp.commit().await?;
                    return Ok(created);
                }
                Err(RepositoryError::Conflict(_)) => {
                    sp.rollback().await?;
                    order.order_number = generate_order_number();
                }
                Err(e) => return Err(e),
            }
        }

        Err(RepositoryError::Conflict(
            "could not allocate a unique order number".to_owned(),
        ))
    }

    /// Insert an order inside a caller-held transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order number collides.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert_in(
        conn: &mut PgConnection,
        order: &NewOrder,
    ) -> Result<Order, RepositoryError> {
        let row: OrderRow = sqlx::query_as(&format!(
            r"
            INSERT INTO orders (
                user_id, order_number, shipping_address_id, billing_address_id,
                shipping_cost, total, payment_method
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(order.user_id)
        .bind(&order.order_number)
        .bind(order.shipping_address_id)
        .bind(order.billing_address_id)
        .bind(order.shipping_cost)
        .bind(order.total)
        .bind(&order.payment_method)
        .fetch_one(conn)
        .await
        .map_err(|e| RepositoryError::conflict_on_unique(e, "order number already exists"))?;

        Ok(row.into())
    }

    /// Insert an order line inside a caller-held transaction. `price` is the
    /// effective unit price at checkout time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert_item_in(
        conn: &mut PgConnection,
        order_id: OrderId,
        product_id: ProductId,
        product_name: &str,
        price: Decimal,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO order_items (order_id, product_id, product_name, price, quantity)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(order_id)
        .bind(product_id)
        .bind(product_name)
        .bind(price)
        .bind(quantity)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Get one of the user's orders with its lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND user_id = $2"
        ))
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.items(row.id).await?;
        Ok(Some(OrderWithItems {
            order: row.into(),
            items,
        }))
    }

    /// List the user's orders with their lines, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderWithItems>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.items(row.id).await?;
            orders.push(OrderWithItems {
                order: row.into(),
                items,
            });
        }

        Ok(orders)
    }

    async fn items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows: Vec<OrderItemRow> = sqlx::query_as(
            r"
            SELECT id, order_id, product_id, product_name, price, quantity
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_order_numbers_are_well_formed() {
        for _ in 0..100 {
            let number = generate_order_number();
            assert_eq!(number.as_str().len(), OrderNumber::LENGTH);
            assert!(number
                .as_str()
                .bytes()
                .all(|b| OrderNumber::ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_generated_order_numbers_vary() {
        let samples: Vec<_> = (0..50).map(|_| generate_order_number()).collect();
        // With a 36^8 space, 50 identical draws would mean a broken RNG.
        assert!(samples.windows(2).any(|w| w[0] != w[1]));
    }
}
