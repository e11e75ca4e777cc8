//! Order domain types.
//!
//! Orders are snapshots: totals, line prices, and quantities are copied at
//! checkout time and never change afterwards, regardless of later product
//! edits. Only `status` and `paid` are mutable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendora_core::{AddressId, OrderId, OrderItemId, OrderNumber, OrderStatus, ProductId, UserId};

use super::address::AddressInput;

/// A placed order.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub order_number: OrderNumber,
    pub status: OrderStatus,
    pub shipping_address_id: Option<AddressId>,
    pub billing_address_id: Option<AddressId>,
    pub shipping_cost: Decimal,
    /// Snapshot total: subtotal at checkout-time effective prices plus
    /// shipping cost.
    pub total: Decimal,
    pub payment_method: String,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an order: an immutable snapshot of what was bought.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    /// The product, if it still exists. The name and price below survive
    /// product deletion.
    pub product_id: Option<ProductId>,
    pub product_name: String,
    /// Effective price at the moment of checkout.
    pub price: Decimal,
    pub quantity: i32,
}

/// An order with its lines, as returned by the order endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Body for `POST /orders` (checkout).
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub shipping_address: AddressInput,
    /// Required unless `same_billing_address` is true.
    pub billing_address: Option<AddressInput>,
    #[serde(default = "default_true")]
    pub same_billing_address: bool,
    /// Client-quoted shipping cost, added to the subtotal as-is.
    #[serde(default)]
    pub shipping_cost: Decimal,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

const fn default_true() -> bool {
    true
}

fn default_payment_method() -> String {
    "credit".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_request_defaults() {
        let request: CheckoutRequest = serde_json::from_value(serde_json::json!({
            "shipping_address": {
                "street": "1 Main St",
                "city": "Springfield",
                "state": "IL",
                "zip_code": "62701",
                "country": "US"
            }
        }))
        .unwrap();

        assert!(request.same_billing_address);
        assert!(request.billing_address.is_none());
        assert_eq!(request.shipping_cost, Decimal::ZERO);
        assert_eq!(request.payment_method, "credit");
    }

    #[test]
    fn test_order_serializes_flat_with_items() {
        let order = Order {
            id: OrderId::new(1),
            user_id: UserId::new(2),
            order_number: OrderNumber::parse("A1B2C3D4").unwrap(),
            status: OrderStatus::Pending,
            shipping_address_id: Some(AddressId::new(3)),
            billing_address_id: Some(AddressId::new(3)),
            shipping_cost: "10.00".parse().unwrap(),
            total: "70.00".parse().unwrap(),
            payment_method: "credit".to_owned(),
            paid: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let with_items = OrderWithItems {
            order,
            items: vec![],
        };

        let value = serde_json::to_value(&with_items).unwrap();
        assert_eq!(value["order_number"], "A1B2C3D4");
        assert_eq!(value["status"], "pending");
        assert!(value["items"].as_array().unwrap().is_empty());
    }
}
