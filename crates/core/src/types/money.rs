//! Money arithmetic for catalog prices and order totals.
//!
//! All monetary amounts are `rust_decimal::Decimal` in the currency's
//! standard unit (dollars, not cents). The helpers here implement the two
//! pricing rules the rest of the system relies on: the effective price of a
//! product and the extended total of a line.

use rust_decimal::Decimal;

/// The price a buyer actually pays: the discount price when one is set,
/// otherwise the list price.
#[must_use]
pub fn effective_price(price: Decimal, discount_price: Option<Decimal>) -> Decimal {
    discount_price.unwrap_or(price)
}

/// Extended total for a line: unit price times quantity.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}
