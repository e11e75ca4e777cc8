//! Vendora server library.
//!
//! Multi-vendor marketplace API: catalog, carts, checkout, addresses,
//! coupons, reviews, notifications, and AI-assisted product copy.
//!
//! Authentication is handled by an upstream gateway; request identity
//! arrives in trusted headers (see [`middleware::identity`]).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod ai;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
