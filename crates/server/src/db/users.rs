//! Database operations for account and vendor profiles.
//!
//! Account rows are provisioned by the upstream auth service (or the seed
//! tooling); this repository only reads and updates profile data for
//! identities that already exist.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vendora_core::{Email, Role, UserId};

use super::RepositoryError;
use crate::models::user::{UpdateProfileInput, UserProfile, VendorProfile};

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: UserId,
    email: String,
    name: String,
    phone: String,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserProfile {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email for user {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            email,
            name: row.name,
            phone: row.phone,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VendorProfileRow {
    user_id: UserId,
    business_name: String,
    description: String,
    approved: bool,
}

impl From<VendorProfileRow> for VendorProfile {
    fn from(row: VendorProfileRow) -> Self {
        Self {
            user_id: row.user_id,
            business_name: row.business_name,
            description: row.description,
            approved: row.approved,
        }
    }
}

const USER_COLUMNS: &str = "id, email, name, phone, role, created_at, updated_at";

/// Repository for account profile database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an account profile by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored email is
    /// invalid.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: UserId) -> Result<Option<UserProfile>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Update an account's profile fields. Absent fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_profile(
        &self,
        id: UserId,
        input: &UpdateProfileInput,
    ) -> Result<UserProfile, RepositoryError> {
        let row: UserRow = sqlx::query_as(&format!(
            r"
            UPDATE users
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.phone.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Get a vendor's profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_vendor_profile(
        &self,
        user_id: UserId,
    ) -> Result<Option<VendorProfile>, RepositoryError> {
        let row: Option<VendorProfileRow> = sqlx::query_as(
            r"
            SELECT user_id, business_name, description, approved
            FROM vendor_profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List approved vendors for the public vendor directory.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_approved_vendors(&self) -> Result<Vec<VendorProfile>, RepositoryError> {
        let rows: Vec<VendorProfileRow> = sqlx::query_as(
            r"
            SELECT user_id, business_name, description, approved
            FROM vendor_profiles
            WHERE approved
            ORDER BY business_name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
