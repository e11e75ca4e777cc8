//! Category handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::db::CategoryRepository;
use crate::error::AppError;
use crate::models::category::Category;
use crate::state::AppState;

/// `GET /categories` - all categories, ordered by name.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, AppError> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}

/// `GET /categories/{slug}` - one category by slug.
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Category>, AppError> {
    let category = CategoryRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {slug}")))?;

    Ok(Json(category))
}
