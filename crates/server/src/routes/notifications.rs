//! Notification handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::instrument;

use vendora_core::NotificationId;

use crate::db::NotificationRepository;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::notification::Notification;
use crate::state::AppState;

/// `GET /notifications` - the caller's notifications, newest first.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Notification>>, AppError> {
    let notifications = NotificationRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(notifications))
}

/// `GET /notifications/unread-count` - badge count.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn unread_count(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Value>, AppError> {
    let count = NotificationRepository::new(state.pool())
        .unread_count(user.id)
        .await?;

    Ok(Json(json!({ "unread": count })))
}

/// `POST /notifications/{id}/read` - mark one notification read.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn mark_read(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<NotificationId>,
) -> Result<StatusCode, AppError> {
    NotificationRepository::new(state.pool())
        .mark_read(user.id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /notifications/read-all` - mark every notification read.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Value>, AppError> {
    let updated = NotificationRepository::new(state.pool())
        .mark_all_read(user.id)
        .await?;

    Ok(Json(json!({ "updated": updated })))
}
