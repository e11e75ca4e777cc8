//! Saved-address handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use vendora_core::{AddressId, AddressKind};

use crate::db::AddressRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::address::{Address, AddressInput};
use crate::state::AppState;

/// Query/body wrapper selecting the address kind. Defaults to shipping.
#[derive(Debug, Deserialize)]
pub struct KindParam {
    #[serde(default)]
    pub kind: Option<AddressKind>,
}

/// `GET /addresses` - the caller's saved addresses, defaults first.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Address>>, AppError> {
    let addresses = AddressRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(addresses))
}

/// `POST /addresses` - save a new address. `?kind=billing` selects the
/// kind; shipping is the default.
#[instrument(skip(state, input), fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<KindParam>,
    Json(input): Json<AddressInput>,
) -> Result<(StatusCode, Json<Address>), AppError> {
    if !input.is_complete() {
        return Err(AppError::BadRequest("incomplete address".to_string()));
    }

    let kind = params.kind.unwrap_or(AddressKind::Shipping);
    let address = AddressRepository::new(state.pool())
        .create(user.id, kind, &input)
        .await?;

    Ok((StatusCode::CREATED, Json(address)))
}

/// `GET /addresses/{id}` - one of the caller's addresses.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<AddressId>,
) -> Result<Json<Address>, AppError> {
    let address = AddressRepository::new(state.pool()).get(user.id, id).await?;
    Ok(Json(address))
}

/// `PUT /addresses/{id}` - update one of the caller's addresses.
#[instrument(skip(state, input), fields(user_id = %user.id))]
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<AddressId>,
    Json(input): Json<AddressInput>,
) -> Result<Json<Address>, AppError> {
    if !input.is_complete() {
        return Err(AppError::BadRequest("incomplete address".to_string()));
    }

    let address = AddressRepository::new(state.pool())
        .update(user.id, id, &input)
        .await?;

    Ok(Json(address))
}

/// `DELETE /addresses/{id}` - delete one of the caller's addresses.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<AddressId>,
) -> Result<StatusCode, AppError> {
    AddressRepository::new(state.pool())
        .delete(user.id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
