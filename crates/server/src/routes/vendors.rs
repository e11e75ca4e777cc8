//! Public vendor directory handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use vendora_core::UserId;

use crate::db::{ProductRepository, UserRepository};
use crate::error::AppError;
use crate::models::product::Product;
use crate::models::user::VendorPublic;
use crate::state::AppState;

/// Response for `GET /vendors/{id}`: the vendor plus their storefront.
#[derive(Debug, Serialize)]
pub struct VendorDetail {
    #[serde(flatten)]
    pub vendor: VendorPublic,
    pub products: Vec<Product>,
}

/// `GET /vendors` - approved vendors, alphabetical.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<VendorPublic>>, AppError> {
    let vendors = UserRepository::new(state.pool())
        .list_approved_vendors()
        .await?;

    Ok(Json(vendors.into_iter().map(Into::into).collect()))
}

/// `GET /vendors/{id}` - one approved vendor with their active products.
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<VendorDetail>, AppError> {
    let profile = UserRepository::new(state.pool())
        .get_vendor_profile(id)
        .await?
        .filter(|profile| profile.approved)
        .ok_or_else(|| AppError::NotFound(format!("vendor {id}")))?;

    let products = ProductRepository::new(state.pool())
        .list_for_vendor(id)
        .await?;

    Ok(Json(VendorDetail {
        vendor: profile.into(),
        products,
    }))
}

/// `GET /vendors/{id}/products` - an approved vendor's active products.
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<Vec<Product>>, AppError> {
    UserRepository::new(state.pool())
        .get_vendor_profile(id)
        .await?
        .filter(|profile| profile.approved)
        .ok_or_else(|| AppError::NotFound(format!("vendor {id}")))?;

    let products = ProductRepository::new(state.pool())
        .list_for_vendor(id)
        .await?;

    Ok(Json(products))
}
