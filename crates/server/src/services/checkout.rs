//! Cart-to-order checkout.
//!
//! The whole conversion runs in a single database transaction: persist the
//! addresses, insert the order header, reserve stock per line, snapshot the
//! lines, clear the cart. If any line's stock reservation fails the
//! transaction rolls back and nothing is left behind, not even a partial
//! order or a half-emptied cart. Concurrent checkouts of the same cart
//! serialize on the locked cart lines, so only one of them can consume it.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, instrument, warn};

use vendora_core::{AddressKind, ProductId, UserId};

use crate::db::{
    AddressRepository, CartRepository, InventoryLedger, NewOrder, NotificationRepository,
    OrderRepository, RepositoryError, ReserveError, generate_order_number,
};
use crate::models::cart::CartItemDetail;
use crate::models::order::{CheckoutRequest, Order, OrderWithItems};

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no items.
    #[error("cart is empty")]
    EmptyCart,

    /// A submitted address is missing required fields.
    #[error("invalid {0} address")]
    InvalidAddress(&'static str),

    /// A line asked for more units than the product has in stock.
    #[error("insufficient stock for {product_name}: {available} available")]
    InsufficientStock {
        product_id: ProductId,
        product_name: String,
        available: i32,
    },

    /// A cart line references a product that no longer exists.
    #[error("product {0} no longer exists")]
    ProductGone(ProductId),

    /// No free order number found after repeated tries.
    #[error("could not allocate an order number")]
    OrderNumberExhausted,

    /// Underlying repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Orchestrates the checkout transaction.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Convert the user's cart into an order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to buy,
    /// [`CheckoutError::InvalidAddress`] for incomplete addresses,
    /// [`CheckoutError::InsufficientStock`] when a line can't be covered,
    /// and [`CheckoutError::Repository`] for database failures. Any error
    /// after the transaction opens rolls the whole checkout back.
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn checkout(
        &self,
        user_id: UserId,
        request: &CheckoutRequest,
    ) -> Result<OrderWithItems, CheckoutError> {
        if !request.shipping_address.is_complete() {
            return Err(CheckoutError::InvalidAddress("shipping"));
        }
        let billing_input = if request.same_billing_address {
            &request.shipping_address
        } else {
            let billing = request
                .billing_address
                .as_ref()
                .ok_or(CheckoutError::InvalidAddress("billing"))?;
            if !billing.is_complete() {
                return Err(CheckoutError::InvalidAddress("billing"));
            }
            billing
        };

        let cart = CartRepository::new(self.pool)
            .get_or_create(user_id)
            .await?;

        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        // The locked read serializes concurrent checkouts of the same cart:
        // the loser blocks here until the winner commits, then sees the
        // emptied cart and fails with EmptyCart instead of double-charging.
        let items = CartRepository::items_locked_in(&mut *tx, cart.id).await?;
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let shipping_address = AddressRepository::insert_in(
            &mut *tx,
            user_id,
            AddressKind::Shipping,
            &request.shipping_address,
        )
        .await?;
        let billing_address =
            AddressRepository::insert_in(&mut *tx, user_id, AddressKind::Billing, billing_input)
                .await?;

        let subtotal: Decimal = items.iter().map(|item| item.line_total).sum();
        let total = subtotal + request.shipping_cost;

        let order = OrderRepository::insert_allocating_in(
            &mut *tx,
            NewOrder {
                user_id,
                order_number: generate_order_number(),
                shipping_address_id: shipping_address.id,
                billing_address_id: billing_address.id,
                shipping_cost: request.shipping_cost,
                total,
                payment_method: request.payment_method.clone(),
            },
        )
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => CheckoutError::OrderNumberExhausted,
            other => CheckoutError::Repository(other),
        })?;

        for item in &items {
            Self::reserve_line(&mut tx, item).await?;
            OrderRepository::insert_item_in(
                &mut *tx,
                order.id,
                item.product_id,
                &item.product_name,
                item.unit_price,
                item.quantity,
            )
            .await?;
        }

        CartRepository::clear_in(&mut *tx, cart.id).await?;
        tx.commit().await.map_err(RepositoryError::from)?;

        // Vendor notifications are best-effort; the order already exists.
        if let Err(e) = self.notify_vendors(&order, &items).await {
            warn!(error = %e, "failed to notify vendors of order");
        }

        let items = OrderRepository::new(self.pool)
            .get_for_user(user_id, order.id)
            .await?
            .map(|o| o.items)
            .unwrap_or_default();

        info!(
            order_number = %order.order_number,
            total = %order.total,
            "checkout completed"
        );

        Ok(OrderWithItems { order, items })
    }

    async fn notify_vendors(
        &self,
        order: &Order,
        items: &[CartItemDetail],
    ) -> Result<(), RepositoryError> {
        let product_ids: Vec<i32> = items.iter().map(|item| item.product_id.into()).collect();
        let vendors: Vec<(UserId,)> =
            sqlx::query_as("SELECT DISTINCT vendor_id FROM products WHERE id = ANY($1)")
                .bind(&product_ids)
                .fetch_all(self.pool)
                .await?;

        let notifications = NotificationRepository::new(self.pool);
        for (vendor_id,) in vendors {
            notifications
                .create(
                    vendor_id,
                    &format!("Order {} includes your products", order.order_number),
                )
                .await?;
        }
        Ok(())
    }

    async fn reserve_line(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        item: &CartItemDetail,
    ) -> Result<(), CheckoutError> {
        match InventoryLedger::reserve(&mut **tx, item.product_id, item.quantity).await {
            Ok(()) => Ok(()),
            Err(ReserveError::InsufficientStock {
                product_id,
                available,
            }) => {
                warn!(
                    product_id = %product_id,
                    requested = item.quantity,
                    available,
                    "checkout rejected on stock"
                );
                Err(CheckoutError::InsufficientStock {
                    product_id,
                    product_name: item.product_name.clone(),
                    available,
                })
            }
            Err(ReserveError::ProductMissing(id)) => Err(CheckoutError::ProductGone(id)),
            Err(ReserveError::Database(e)) => Err(RepositoryError::from(e).into()),
        }
    }
}
