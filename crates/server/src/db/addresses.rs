//! Database operations for saved addresses.

use sqlx::{PgConnection, PgPool};

use vendora_core::{AddressId, AddressKind, UserId};

use super::RepositoryError;
use crate::models::address::{Address, AddressInput};

#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: AddressId,
    user_id: UserId,
    street: String,
    city: String,
    state: String,
    zip_code: String,
    country: String,
    kind: AddressKind,
    is_default: bool,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            street: row.street,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            country: row.country,
            kind: row.kind,
            is_default: row.is_default,
        }
    }
}

const ADDRESS_COLUMNS: &str =
    "id, user_id, street, city, state, zip_code, country, kind, is_default";

/// Repository for address database operations.
///
/// Maintains the invariant that each (user, kind) pair has at most one
/// default address: any write that sets `is_default` first clears competing
/// defaults inside the same transaction.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Save a new address for the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        user_id: UserId,
        kind: AddressKind,
        input: &AddressInput,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let address = Self::insert_in(&mut *tx, user_id, kind, input).await?;
        tx.commit().await?;
        Ok(address)
    }

    /// Insert an address inside a caller-held transaction. Used by checkout
    /// so address persistence shares its transaction-or-nothing fate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert_in(
        conn: &mut PgConnection,
        user_id: UserId,
        kind: AddressKind,
        input: &AddressInput,
    ) -> Result<Address, RepositoryError> {
        if input.default {
            Self::clear_default_in(conn, user_id, kind).await?;
        }

        let row: AddressRow = sqlx::query_as(&format!(
            r"
            INSERT INTO addresses (user_id, street, city, state, zip_code, country, kind, is_default)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ADDRESS_COLUMNS}
            "
        ))
        .bind(user_id)
        .bind(&input.street)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.zip_code)
        .bind(&input.country)
        .bind(kind)
        .bind(input.default)
        .fetch_one(conn)
        .await?;

        Ok(row.into())
    }

    /// Get one of the user's addresses.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist or
    /// belongs to someone else.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn get(&self, user_id: UserId, id: AddressId) -> Result<Address, RepositoryError> {
        let row: Option<AddressRow> = sqlx::query_as(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// List the user's saved addresses, defaults first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Address>, RepositoryError> {
        let rows: Vec<AddressRow> = sqlx::query_as(&format!(
            r"
            SELECT {ADDRESS_COLUMNS}
            FROM addresses
            WHERE user_id = $1
            ORDER BY is_default DESC, id DESC
            "
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Update one of the user's addresses.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist or
    /// belongs to someone else.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        user_id: UserId,
        id: AddressId,
        input: &AddressInput,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let kind: Option<(AddressKind,)> =
            sqlx::query_as("SELECT kind FROM addresses WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (kind,) = kind.ok_or(RepositoryError::NotFound)?;

        if input.default {
            Self::clear_default_in(&mut *tx, user_id, kind).await?;
        }

        let row: AddressRow = sqlx::query_as(&format!(
            r"
            UPDATE addresses
            SET street = $3, city = $4, state = $5, zip_code = $6, country = $7, is_default = $8
            WHERE id = $1 AND user_id = $2
            RETURNING {ADDRESS_COLUMNS}
            "
        ))
        .bind(id)
        .bind(user_id)
        .bind(&input.street)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.zip_code)
        .bind(&input.country)
        .bind(input.default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    /// Delete one of the user's addresses.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist or
    /// belongs to someone else.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, user_id: UserId, id: AddressId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn clear_default_in(
        conn: &mut PgConnection,
        user_id: UserId,
        kind: AddressKind,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE addresses SET is_default = FALSE WHERE user_id = $1 AND kind = $2")
            .bind(user_id)
            .bind(kind)
            .execute(conn)
            .await?;

        Ok(())
    }
}
