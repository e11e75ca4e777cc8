//! Cart domain types.
//!
//! A cart belongs to exactly one account and is created lazily on first
//! access. It is never deleted; a successful checkout empties it. The cart
//! total is always computed at read time from current effective prices so
//! that price changes are reflected before checkout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendora_core::{CartId, CartItemId, ProductId, UserId, line_total};

/// A shopping cart.
#[derive(Debug, Clone, Serialize)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One cart line, joined with the current state of its product.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemDetail {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub product_name: String,
    /// Current effective price of the product (not a snapshot).
    pub unit_price: Decimal,
    pub quantity: i32,
    /// `unit_price * quantity`.
    pub line_total: Decimal,
}

impl CartItemDetail {
    /// Build a line from the current product state.
    #[must_use]
    pub fn new(
        id: CartItemId,
        product_id: ProductId,
        product_name: String,
        unit_price: Decimal,
        quantity: i32,
    ) -> Self {
        Self {
            id,
            product_id,
            product_name,
            unit_price,
            quantity,
            line_total: line_total(unit_price, quantity),
        }
    }
}

/// A cart with its lines and computed total, as returned by `GET /cart`.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub id: CartId,
    pub items: Vec<CartItemDetail>,
    /// Sum of line totals at current effective prices.
    pub total: Decimal,
}

impl CartView {
    /// Assemble a view, computing the total from the lines.
    #[must_use]
    pub fn new(id: CartId, items: Vec<CartItemDetail>) -> Self {
        let total = items.iter().map(|item| item.line_total).sum();
        Self { id, items, total }
    }
}

/// Body for `POST /cart/items`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddItemInput {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

/// Body for `PUT /cart/items/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItemInput {
    pub quantity: i32,
}

const fn default_quantity() -> i32 {
    1
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: i32, price: &str, quantity: i32) -> CartItemDetail {
        CartItemDetail::new(
            CartItemId::new(id),
            ProductId::new(id),
            format!("product-{id}"),
            price.parse().unwrap(),
            quantity,
        )
    }

    #[test]
    fn test_line_total_computed() {
        let item = line(1, "19.99", 3);
        assert_eq!(item.line_total, "59.97".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_cart_view_total_sums_lines() {
        let view = CartView::new(CartId::new(1), vec![line(1, "20.00", 3), line(2, "5.50", 2)]);
        assert_eq!(view.total, "71.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let view = CartView::new(CartId::new(1), Vec::new());
        assert_eq!(view.total, Decimal::ZERO);
    }

    #[test]
    fn test_add_item_default_quantity() {
        let input: AddItemInput =
            serde_json::from_value(serde_json::json!({ "product_id": 4 })).unwrap();
        assert_eq!(input.quantity, 1);
    }
}
