//! Product review handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use vendora_core::ProductId;

use crate::db::{ProductRepository, ReviewRepository};
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::review::{CreateReviewInput, ProductReview};
use crate::state::AppState;

/// `GET /products/{id}/reviews` - a product's reviews, newest first.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Vec<ProductReview>>, AppError> {
    let reviews = ReviewRepository::new(state.pool())
        .list_for_product(product_id)
        .await?;

    Ok(Json(reviews))
}

/// `POST /products/{id}/reviews` - review a product. One per account.
#[instrument(skip(state, input), fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(product_id): Path<ProductId>,
    Json(input): Json<CreateReviewInput>,
) -> Result<(StatusCode, Json<ProductReview>), AppError> {
    if !input.is_valid() {
        return Err(AppError::BadRequest(
            "rating must be 1-5 and title non-empty".to_string(),
        ));
    }

    ProductRepository::new(state.pool())
        .get_active(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let review = ReviewRepository::new(state.pool())
        .create(product_id, user.id, &input)
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}
