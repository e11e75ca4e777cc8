//! Coupon domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendora_core::CouponId;

/// A discount coupon with an activation window.
///
/// Coupons are validated on request and applied by the caller; checkout
/// never applies one implicitly.
#[derive(Debug, Clone, Serialize)]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    /// Discount percentage.
    pub discount: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub active: bool,
}

impl Coupon {
    /// Whether the coupon can be redeemed at `now`: active and inside
    /// `[valid_from, valid_to)`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.active && now >= self.valid_from && now < self.valid_to
    }
}

/// Body for `POST /coupons/validate`.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateCouponInput {
    pub code: String,
}

/// Response for a successful coupon validation.
#[derive(Debug, Clone, Serialize)]
pub struct CouponValidation {
    pub code: String,
    pub discount: Decimal,
    pub valid: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn coupon(active: bool, from_offset: i64, to_offset: i64) -> (Coupon, DateTime<Utc>) {
        let now = Utc::now();
        let coupon = Coupon {
            id: CouponId::new(1),
            code: "SAVE10".to_owned(),
            discount: "10.00".parse().unwrap(),
            valid_from: now + Duration::hours(from_offset),
            valid_to: now + Duration::hours(to_offset),
            active,
        };
        (coupon, now)
    }

    #[test]
    fn test_valid_inside_window() {
        let (coupon, now) = coupon(true, -1, 1);
        assert!(coupon.is_valid_at(now));
    }

    #[test]
    fn test_invalid_when_inactive() {
        let (coupon, now) = coupon(false, -1, 1);
        assert!(!coupon.is_valid_at(now));
    }

    #[test]
    fn test_invalid_outside_window() {
        let (expired, now) = coupon(true, -2, -1);
        assert!(!expired.is_valid_at(now));
        let (upcoming, now) = coupon(true, 1, 2);
        assert!(!upcoming.is_valid_at(now));
    }

    #[test]
    fn test_window_is_half_open() {
        let (coupon, _) = coupon(true, 0, 1);
        // Start is inclusive, end is exclusive.
        assert!(coupon.is_valid_at(coupon.valid_from));
        assert!(!coupon.is_valid_at(coupon.valid_to));
    }
}
