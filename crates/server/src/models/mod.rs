//! Domain types and request/response bodies.
//!
//! These types represent validated domain objects separate from database
//! row types; the row types and their `From` conversions live next to the
//! queries in [`crate::db`].

pub mod address;
pub mod cart;
pub mod category;
pub mod coupon;
pub mod notification;
pub mod order;
pub mod product;
pub mod review;
pub mod user;

pub use address::{Address, AddressInput};
pub use cart::{AddItemInput, Cart, CartItemDetail, CartView, UpdateItemInput};
pub use category::Category;
pub use coupon::{Coupon, CouponValidation, ValidateCouponInput};
pub use notification::Notification;
pub use order::{CheckoutRequest, Order, OrderItem, OrderWithItems};
pub use product::{CreateProductInput, Product, ProductFilter, UpdateProductInput};
pub use review::{CreateReviewInput, ProductReview};
pub use user::{UpdateProfileInput, UserProfile, VendorProfile, VendorPublic};
