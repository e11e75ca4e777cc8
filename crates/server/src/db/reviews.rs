//! Database operations for product reviews.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vendora_core::{ProductId, ReviewId, UserId};

use super::RepositoryError;
use crate::models::review::{CreateReviewInput, ProductReview};

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: ReviewId,
    product_id: ProductId,
    user_id: UserId,
    rating: i16,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for ProductReview {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            user_id: row.user_id,
            rating: row.rating,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a review. Each account gets one review per product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the account already reviewed
    /// this product.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        product_id: ProductId,
        user_id: UserId,
        input: &CreateReviewInput,
    ) -> Result<ProductReview, RepositoryError> {
        let row: ReviewRow = sqlx::query_as(
            r"
            INSERT INTO product_reviews (product_id, user_id, rating, title, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, product_id, user_id, rating, title, content, created_at
            ",
        )
        .bind(product_id)
        .bind(user_id)
        .bind(input.rating)
        .bind(&input.title)
        .bind(&input.content)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::conflict_on_unique(e, "product already reviewed"))?;

        Ok(row.into())
    }

    /// List a product's reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductReview>, RepositoryError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r"
            SELECT id, product_id, user_id, rating, title, content, created_at
            FROM product_reviews
            WHERE product_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
