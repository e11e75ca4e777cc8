//! Integration tests for Vendora.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p vendora-cli -- migrate
//! cargo run -p vendora-cli -- seed
//!
//! # Start the server
//! cargo run -p vendora-server
//!
//! # Run integration tests
//! cargo test -p vendora-integration-tests -- --ignored
//! ```
//!
//! The tests talk to a running server over HTTP, impersonating accounts by
//! setting the gateway identity headers directly.

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};

/// Gateway header carrying the account ID.
pub const USER_ID_HEADER: &str = "x-vendora-user-id";
/// Gateway header carrying the account role.
pub const ROLE_HEADER: &str = "x-vendora-role";

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("VENDORA_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A plain client with no identity headers.
#[must_use]
pub fn anonymous_client() -> Client {
    Client::builder().build().expect("Failed to create HTTP client")
}

/// A client that impersonates an account by setting the gateway headers
/// on every request.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client_as(user_id: i32, role: &str) -> Client {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_ID_HEADER,
        HeaderValue::from_str(&user_id.to_string()).expect("header value"),
    );
    headers.insert(ROLE_HEADER, HeaderValue::from_str(role).expect("header value"));

    Client::builder()
        .default_headers(headers)
        .build()
        .expect("Failed to create HTTP client")
}
