//! Notification domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vendora_core::{NotificationId, UserId};

/// A message for one account, e.g. an order confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: UserId,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
