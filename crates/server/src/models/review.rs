//! Product review domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_core::{ProductId, ReviewId, UserId};

/// A buyer's review of a product. One per (product, account).
#[derive(Debug, Clone, Serialize)]
pub struct ProductReview {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    /// 1 to 5 stars.
    pub rating: i16,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Body for `POST /products/{id}/reviews`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewInput {
    pub rating: i16,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl CreateReviewInput {
    /// Rating must be 1-5 and the title non-blank.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (1..=5).contains(&self.rating) && !self.title.trim().is_empty()
    }
}
