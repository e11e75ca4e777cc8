//! Account profile handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::user::{UpdateProfileInput, UserProfile, VendorProfile};
use crate::state::AppState;

/// Response for `GET /profile`: the account plus vendor data when present.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorProfile>,
}

/// `GET /profile` - the caller's profile.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn get(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let repo = UserRepository::new(state.pool());
    let profile = repo
        .get(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("profile not found".to_string()))?;

    let vendor = if user.role.can_manage_products() {
        repo.get_vendor_profile(user.id).await?
    } else {
        None
    };

    Ok(Json(ProfileResponse { profile, vendor }))
}

/// `PUT /profile` - update the caller's name or phone.
#[instrument(skip(state, input), fields(user_id = %user.id))]
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<UpdateProfileInput>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = UserRepository::new(state.pool())
        .update_profile(user.id, &input)
        .await?;

    Ok(Json(profile))
}
