//! Database operations for coupons.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use vendora_core::CouponId;

use super::RepositoryError;
use crate::models::coupon::Coupon;

#[derive(Debug, sqlx::FromRow)]
struct CouponRow {
    id: CouponId,
    code: String,
    discount: Decimal,
    valid_from: DateTime<Utc>,
    valid_to: DateTime<Utc>,
    active: bool,
}

impl From<CouponRow> for Coupon {
    fn from(row: CouponRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            discount: row.discount,
            valid_from: row.valid_from,
            valid_to: row.valid_to,
            active: row.active,
        }
    }
}

/// Repository for coupon database operations.
pub struct CouponRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CouponRepository<'a> {
    /// Create a new coupon repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up an active coupon by its code. Codes match case-insensitively;
    /// deactivated coupons are treated as if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<Coupon>, RepositoryError> {
        let row: Option<CouponRow> = sqlx::query_as(
            r"
            SELECT id, code, discount, valid_from, valid_to, active
            FROM coupons
            WHERE upper(code) = upper($1) AND active
            ",
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}
