//! Order handlers. Checkout lives in [`crate::services::checkout`]; these
//! handlers only translate HTTP to and from the service.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use vendora_core::OrderId;

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::order::{CheckoutRequest, OrderWithItems};
use crate::services::CheckoutService;
use crate::state::AppState;

/// `POST /orders` - convert the caller's cart into an order.
#[instrument(skip(state, request), fields(user_id = %user.id))]
pub async fn checkout(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderWithItems>), AppError> {
    if !user.role.can_shop() {
        return Err(AppError::Forbidden(
            "vendor accounts cannot place orders".to_string(),
        ));
    }

    let order = CheckoutService::new(state.pool())
        .checkout(user.id, &request)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /orders` - the caller's order history, newest first.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<OrderWithItems>>, AppError> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(orders))
}

/// `GET /orders/{id}` - one of the caller's orders.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderWithItems>, AppError> {
    OrderRepository::new(state.pool())
        .get_for_user(user.id, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}
