//! Product catalog and catalog-management handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use vendora_core::ProductId;

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::product::{CreateProductInput, Product, ProductFilter, UpdateProductInput};
use crate::state::AppState;

/// `GET /products` - list active products with filters.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(products))
}

/// `GET /products/{id}` - product detail by numeric ID or slug.
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Product>, AppError> {
    let repo = ProductRepository::new(state.pool());

    let product = match key.parse::<i32>() {
        Ok(id) => repo.get_active(ProductId::new(id)).await?,
        Err(_) => repo.get_active_by_slug(&key).await?,
    };

    product
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {key}")))
}

/// `POST /products` - create a product owned by the calling vendor.
#[instrument(skip(state, input), fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateProductInput>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    user.require_vendor()?;
    if input.price < rust_decimal::Decimal::ZERO || input.stock < 0 {
        return Err(AppError::BadRequest(
            "price and stock must be non-negative".to_string(),
        ));
    }

    let product = ProductRepository::new(state.pool())
        .create(user.id, &input)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /products/{id}` - update a product. Vendors may only touch their
/// own; admins may touch any.
#[instrument(skip(state, input), fields(user_id = %user.id))]
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<ProductId>,
    Json(input): Json<UpdateProductInput>,
) -> Result<Json<Product>, AppError> {
    user.require_vendor()?;

    let negative = |value: Option<rust_decimal::Decimal>| {
        value.is_some_and(|v| v < rust_decimal::Decimal::ZERO)
    };
    if negative(input.price)
        || negative(input.discount_price.flatten())
        || input.stock.is_some_and(|s| s < 0)
    {
        return Err(AppError::BadRequest(
            "price and stock must be non-negative".to_string(),
        ));
    }

    let repo = ProductRepository::new(state.pool());
    check_ownership(&repo, &user, id).await?;

    let product = repo.update(id, &input).await?;
    Ok(Json(product))
}

/// `DELETE /products/{id}` - delete a product.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, AppError> {
    user.require_vendor()?;
    let repo = ProductRepository::new(state.pool());
    check_ownership(&repo, &user, id).await?;

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("product {id}")))
    }
}

async fn check_ownership(
    repo: &ProductRepository<'_>,
    user: &CurrentUser,
    id: ProductId,
) -> Result<(), AppError> {
    let product = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    if product.vendor_id != user.id && !user.role.can_manage_any_product() {
        return Err(AppError::Forbidden("not your product".to_string()));
    }
    Ok(())
}
