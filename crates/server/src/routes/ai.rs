//! AI copywriter handlers.
//!
//! These routes require a configured copywriter client and are limited to
//! vendor and admin accounts.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::ai::CopywriterClient;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Body for `POST /ai/seo-description`.
#[derive(Debug, Deserialize)]
pub struct SeoDescriptionRequest {
    pub product_name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Body for `POST /ai/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Generated copy response.
#[derive(Debug, Serialize)]
pub struct CopyResponse {
    pub text: String,
}

/// `POST /ai/seo-description` - draft an SEO description for a product.
#[instrument(skip(state, request), fields(user_id = %user.id))]
pub async fn seo_description(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<SeoDescriptionRequest>,
) -> Result<Json<CopyResponse>, AppError> {
    let client = require_copywriter(&state, &user)?;
    if request.product_name.trim().is_empty() {
        return Err(AppError::BadRequest("product_name is required".to_string()));
    }

    let text = client
        .seo_description(&request.product_name, &request.keywords)
        .await?;

    Ok(Json(CopyResponse { text }))
}

/// `POST /ai/generate` - free-form product copy from a vendor prompt.
#[instrument(skip(state, request), fields(user_id = %user.id))]
pub async fn generate(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<CopyResponse>, AppError> {
    let client = require_copywriter(&state, &user)?;
    if request.prompt.trim().is_empty() {
        return Err(AppError::BadRequest("prompt is required".to_string()));
    }

    let text = client.generate(&request.prompt).await?;
    Ok(Json(CopyResponse { text }))
}

fn require_copywriter<'a>(
    state: &'a AppState,
    user: &CurrentUser,
) -> Result<&'a CopywriterClient, AppError> {
    if !user.role.can_use_copywriter() {
        return Err(AppError::Forbidden(
            "vendor account required".to_string(),
        ));
    }
    state.copywriter().ok_or_else(|| {
        AppError::ServiceUnavailable("copywriter is not configured".to_string())
    })
}
