//! Database operations for products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use vendora_core::{CategoryId, ProductId, UserId};

use super::RepositoryError;
use crate::models::product::{CreateProductInput, Product, ProductFilter, UpdateProductInput};

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    vendor_id: UserId,
    category_id: Option<CategoryId>,
    name: String,
    slug: String,
    description: String,
    price: Decimal,
    discount_price: Option<Decimal>,
    stock: i32,
    sku: String,
    active: bool,
    featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            vendor_id: row.vendor_id,
            category_id: row.category_id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            price: row.price,
            discount_price: row.discount_price,
            stock: row.stock,
            sku: row.sku,
            active: row.active,
            featured: row.featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = r"
    id, vendor_id, category_id, name, slug, description,
    price, discount_price, stock, sku, active, featured,
    created_at, updated_at
";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a product owned by `vendor_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug or sku is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        vendor_id: UserId,
        input: &CreateProductInput,
    ) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(&format!(
            r"
            INSERT INTO products (
                vendor_id, category_id, name, slug, description,
                price, discount_price, stock, sku, active, featured
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(vendor_id)
        .bind(input.category_id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.discount_price)
        .bind(input.stock)
        .bind(&input.sku)
        .bind(input.active)
        .bind(input.featured)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::conflict_on_unique(e, "slug or sku already exists"))?;

        Ok(row.into())
    }

    /// Get a product by ID, regardless of its active flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Get an active product by ID (public catalog view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_active(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND active"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Get an active product by slug (public catalog view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_active_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = $1 AND active"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List active products with filtering.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let limit = filter.limit.unwrap_or(50).clamp(1, 200);
        let offset = filter.offset.unwrap_or(0).max(0);
        let search = filter
            .search
            .as_ref()
            .map(|s| format!("%{}%", s.replace('%', "\\%").replace('_', "\\_")));

        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM products p
            WHERE p.active
              AND ($1::text IS NULL
                   OR p.category_id IN (SELECT id FROM categories WHERE slug = $1))
              AND ($2::int IS NULL OR p.vendor_id = $2)
              AND ($3::numeric IS NULL OR p.price >= $3)
              AND ($4::numeric IS NULL OR p.price <= $4)
              AND ($5::text IS NULL OR p.name ILIKE $5 OR p.description ILIKE $5)
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $6 OFFSET $7
            "
        ))
        .bind(filter.category.as_deref())
        .bind(filter.vendor)
        .bind(filter.min_price)
        .bind(filter.max_price)
        .bind(search.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List a vendor's active products (public storefront view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_vendor(&self, vendor_id: UserId) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE vendor_id = $1 AND active
            ORDER BY created_at DESC, id DESC
            "
        ))
        .bind(vendor_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Update a product. Absent fields are left unchanged; an explicit null
    /// `discount_price` clears the discount.
    ///
    /// Note: `stock` updates here are vendor restocks; checkout never goes
    /// through this path (see [`super::InventoryLedger`]).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        input: &UpdateProductInput,
    ) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(&format!(
            r"
            UPDATE products
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                discount_price = CASE WHEN $5 THEN $6::numeric ELSE discount_price END,
                category_id = COALESCE($7, category_id),
                stock = COALESCE($8, stock),
                active = COALESCE($9, active),
                featured = COALESCE($10, featured),
                updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.description.as_deref())
        .bind(input.price)
        .bind(input.discount_price.is_some())
        .bind(input.discount_price.flatten())
        .bind(input.category_id)
        .bind(input.stock)
        .bind(input.active)
        .bind(input.featured)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a product.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
