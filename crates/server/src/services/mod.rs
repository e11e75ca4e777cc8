//! Business logic that spans multiple repositories.

pub mod checkout;

pub use checkout::{CheckoutError, CheckoutService};
