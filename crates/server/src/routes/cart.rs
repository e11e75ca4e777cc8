//! Cart handlers.
//!
//! Carts are per-account and created lazily; `GET /cart` on a fresh account
//! returns an empty cart rather than a 404.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use vendora_core::CartItemId;

use crate::db::{CartRepository, ProductRepository};
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::cart::{AddItemInput, CartView, UpdateItemInput};
use crate::state::AppState;

/// `GET /cart` - the caller's cart with lines and total.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn view(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<CartView>, AppError> {
    let repo = CartRepository::new(state.pool());
    let cart = repo.get_or_create(user.id).await?;
    let items = repo.items(cart.id).await?;

    Ok(Json(CartView::new(cart.id, items)))
}

/// `POST /cart/items` - add a product to the cart, merging quantities if it
/// is already there.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn add_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<AddItemInput>,
) -> Result<(StatusCode, Json<CartView>), AppError> {
    if input.quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    // Only active products can be added; stock is not reserved until
    // checkout.
    ProductRepository::new(state.pool())
        .get_active(input.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", input.product_id)))?;

    let repo = CartRepository::new(state.pool());
    let cart = repo.get_or_create(user.id).await?;
    repo.add_item(cart.id, input.product_id, input.quantity)
        .await?;
    let items = repo.items(cart.id).await?;

    Ok((StatusCode::CREATED, Json(CartView::new(cart.id, items))))
}

/// `PUT /cart/items/{id}` - set a line's quantity.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn update_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(item_id): Path<CartItemId>,
    Json(input): Json<UpdateItemInput>,
) -> Result<Json<CartView>, AppError> {
    if input.quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    let repo = CartRepository::new(state.pool());
    let cart = repo.get_or_create(user.id).await?;
    repo.update_item(cart.id, item_id, input.quantity).await?;
    let items = repo.items(cart.id).await?;

    Ok(Json(CartView::new(cart.id, items)))
}

/// `DELETE /cart/items/{id}` - remove a line.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn remove_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(item_id): Path<CartItemId>,
) -> Result<Json<CartView>, AppError> {
    let repo = CartRepository::new(state.pool());
    let cart = repo.get_or_create(user.id).await?;
    repo.remove_item(cart.id, item_id).await?;
    let items = repo.items(cart.id).await?;

    Ok(Json(CartView::new(cart.id, items)))
}
