//! HTTP route handlers for the marketplace API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (pings the database)
//!
//! # Catalog (public)
//! GET  /products                   - Product listing with filters
//! GET  /products/{id}              - Product detail (numeric ID or slug)
//! GET  /products/{id}/reviews      - Product reviews
//! GET  /categories                 - Category listing
//! GET  /categories/{slug}          - Category detail
//! GET  /vendors                    - Approved vendor directory
//! GET  /vendors/{id}               - Vendor detail with their products
//! GET  /vendors/{id}/products      - Vendor's active products
//!
//! # Catalog management (vendor/admin)
//! POST   /products                 - Create product
//! PUT    /products/{id}            - Update product
//! DELETE /products/{id}            - Delete product
//!
//! # Cart (requires identity)
//! GET    /cart                     - Cart with lines and total
//! POST   /cart/items               - Add product (merges quantities)
//! PUT    /cart/items/{id}          - Set line quantity
//! DELETE /cart/items/{id}          - Remove line
//!
//! # Orders (requires identity)
//! POST /orders                     - Checkout the cart
//! GET  /orders                     - Order history
//! GET  /orders/{id}                - Order detail
//!
//! # Addresses (requires identity)
//! GET    /addresses                - Saved addresses
//! POST   /addresses                - Save address
//! GET    /addresses/{id}           - Address detail
//! PUT    /addresses/{id}           - Update address
//! DELETE /addresses/{id}           - Delete address
//!
//! # Misc (requires identity)
//! POST /coupons/validate           - Validate a coupon code
//! POST /products/{id}/reviews      - Review a product
//! GET  /profile                    - Account profile
//! PUT  /profile                    - Update profile
//! GET  /notifications              - Notification feed
//! GET  /notifications/unread-count - Unread badge count
//! POST /notifications/{id}/read    - Mark one read
//! POST /notifications/read-all     - Mark all read
//!
//! # AI copywriter (vendor/admin, requires configuration)
//! POST /ai/seo-description         - Draft an SEO product description
//! POST /ai/generate                - Free-form product copy
//! ```

pub mod addresses;
pub mod ai;
pub mod cart;
pub mod categories;
pub mod coupons;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod profile;
pub mod reviews;
pub mod vendors;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .route(
            "/products",
            get(products::list).post(products::create),
        )
        .route(
            "/products/{id}",
            get(products::detail)
                .put(products::update)
                .delete(products::delete),
        )
        .route(
            "/products/{id}/reviews",
            get(reviews::list).post(reviews::create),
        )
        .route("/categories", get(categories::list))
        .route("/categories/{slug}", get(categories::detail))
        .route("/vendors", get(vendors::list))
        .route("/vendors/{id}", get(vendors::detail))
        .route("/vendors/{id}/products", get(vendors::products))
        .route("/cart", get(cart::view))
        .route("/cart/items", post(cart::add_item))
        .route(
            "/cart/items/{id}",
            put(cart::update_item).delete(cart::remove_item),
        )
        .route("/orders", get(orders::list).post(orders::checkout))
        .route("/orders/{id}", get(orders::detail))
        .route(
            "/addresses",
            get(addresses::list).post(addresses::create),
        )
        .route(
            "/addresses/{id}",
            get(addresses::detail)
                .put(addresses::update)
                .delete(addresses::delete),
        )
        .route("/coupons/validate", post(coupons::validate))
        .route("/profile", get(profile::get).put(profile::update))
        .route("/notifications", get(notifications::list))
        .route(
            "/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route(
            "/notifications/{id}/read",
            post(notifications::mark_read),
        )
        .route("/notifications/read-all", post(notifications::mark_all_read))
        .route("/ai/seo-description", post(ai::seo_description))
        .route("/ai/generate", post(ai::generate))
        .with_state(state)
}
