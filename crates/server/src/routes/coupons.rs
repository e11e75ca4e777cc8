//! Coupon validation handler.

use axum::{Json, extract::State};
use chrono::Utc;
use tracing::instrument;

use crate::db::CouponRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::coupon::{CouponValidation, ValidateCouponInput};
use crate::state::AppState;

/// `POST /coupons/validate` - check a code and return its discount.
///
/// Unknown and deactivated codes are a 404; a known code outside its
/// validity window is a 400.
#[instrument(skip(state, input), fields(user_id = %user.id))]
pub async fn validate(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<ValidateCouponInput>,
) -> Result<Json<CouponValidation>, AppError> {
    let coupon = CouponRepository::new(state.pool())
        .get_by_code(input.code.trim())
        .await?
        .ok_or_else(|| AppError::NotFound("coupon not found".to_string()))?;

    if !coupon.is_valid_at(Utc::now()) {
        return Err(AppError::BadRequest("coupon has expired".to_string()));
    }

    Ok(Json(CouponValidation {
        code: coupon.code,
        discount: coupon.discount,
        valid: true,
    }))
}
