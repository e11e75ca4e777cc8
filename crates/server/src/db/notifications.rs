//! Database operations for in-app notifications.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vendora_core::{NotificationId, UserId};

use super::RepositoryError;
use crate::models::notification::Notification;

#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: NotificationId,
    recipient_id: UserId,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            recipient_id: row.recipient_id,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

/// Repository for notification database operations.
pub struct NotificationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NotificationRepository<'a> {
    /// Create a new notification repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a notification for a recipient.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        recipient_id: UserId,
        message: &str,
    ) -> Result<Notification, RepositoryError> {
        let row: NotificationRow = sqlx::query_as(
            r"
            INSERT INTO notifications (recipient_id, message)
            VALUES ($1, $2)
            RETURNING id, recipient_id, message, is_read, created_at
            ",
        )
        .bind(recipient_id)
        .bind(message)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List the recipient's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        recipient_id: UserId,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            r"
            SELECT id, recipient_id, message, is_read, created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(recipient_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count the recipient's unread notifications.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn unread_count(&self, recipient_id: UserId) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT count(*) FROM notifications WHERE recipient_id = $1 AND NOT is_read",
        )
        .bind(recipient_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Mark one of the recipient's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the notification doesn't exist
    /// or belongs to someone else.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn mark_read(
        &self,
        recipient_id: UserId,
        id: NotificationId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND recipient_id = $2",
        )
        .bind(id)
        .bind(recipient_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Mark all of the recipient's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn mark_all_read(&self, recipient_id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE recipient_id = $1 AND NOT is_read",
        )
        .bind(recipient_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
