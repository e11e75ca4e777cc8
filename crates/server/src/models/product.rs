//! Product and catalog domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendora_core::{CategoryId, ProductId, UserId, effective_price};

/// A product listed by a vendor.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// The vendor account that owns this listing.
    pub vendor_id: UserId,
    /// Optional category.
    pub category_id: Option<CategoryId>,
    /// Display name.
    pub name: String,
    /// URL slug, unique across the catalog.
    pub slug: String,
    /// Long-form description.
    pub description: String,
    /// List price. Never negative.
    pub price: Decimal,
    /// Optional discounted price; when set, this is what buyers pay.
    pub discount_price: Option<Decimal>,
    /// Units on hand. Never negative; only checkout decrements it.
    pub stock: i32,
    /// Stock-keeping unit, unique across the catalog.
    pub sku: String,
    /// Inactive products are hidden from browsing and cannot be carted.
    pub active: bool,
    /// Featured on the home page.
    pub featured: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The price a buyer pays right now: discount price if set, else list
    /// price.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        effective_price(self.price, self.discount_price)
    }
}

/// Body for `POST /products`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub category_id: Option<CategoryId>,
    pub sku: String,
    #[serde(default)]
    pub stock: i32,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub featured: bool,
}

/// Body for `PUT /products/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    /// Absent leaves the discount unchanged; an explicit `null` clears it.
    #[serde(default, deserialize_with = "some_if_present")]
    pub discount_price: Option<Option<Decimal>>,
    pub category_id: Option<CategoryId>,
    pub stock: Option<i32>,
    pub active: Option<bool>,
    pub featured: Option<bool>,
}

const fn default_true() -> bool {
    true
}

/// Wraps a field in `Some` whenever it appears in the payload, so an
/// explicit `null` (`Some(None)`) is distinguishable from an absent field
/// (`None`, via `#[serde(default)]`).
fn some_if_present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query parameters for `GET /products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    /// Category slug.
    pub category: Option<String>,
    /// Vendor account ID.
    pub vendor: Option<UserId>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Case-insensitive substring match on name and description.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new(1),
            vendor_id: UserId::new(1),
            category_id: None,
            name: "Widget".to_owned(),
            slug: "widget".to_owned(),
            description: String::new(),
            price: "20.00".parse().unwrap(),
            discount_price: None,
            stock: 5,
            sku: "WID-1".to_owned(),
            active: true,
            featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_price_without_discount() {
        let product = sample_product();
        assert_eq!(product.effective_price(), "20.00".parse().unwrap());
    }

    #[test]
    fn test_effective_price_with_discount() {
        let mut product = sample_product();
        product.discount_price = Some("15.00".parse().unwrap());
        assert_eq!(product.effective_price(), "15.00".parse().unwrap());
    }

    #[test]
    fn test_update_input_distinguishes_null_from_absent() {
        let absent: UpdateProductInput = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(absent.discount_price, None);

        let cleared: UpdateProductInput =
            serde_json::from_value(serde_json::json!({ "discount_price": null })).unwrap();
        assert_eq!(cleared.discount_price, Some(None));

        let set: UpdateProductInput =
            serde_json::from_value(serde_json::json!({ "discount_price": "9.99" })).unwrap();
        assert_eq!(set.discount_price, Some(Some("9.99".parse().unwrap())));
    }

    #[test]
    fn test_create_input_defaults() {
        let input: CreateProductInput = serde_json::from_value(serde_json::json!({
            "name": "Widget",
            "slug": "widget",
            "price": "20.00",
            "sku": "WID-1"
        }))
        .unwrap();
        assert!(input.active);
        assert!(!input.featured);
        assert_eq!(input.stock, 0);
    }
}
