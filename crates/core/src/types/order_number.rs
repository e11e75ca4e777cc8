//! Public order identifiers.
//!
//! Orders are exposed to buyers by a short human-readable token rather than
//! a row ID. The token format is fixed: 8 uppercase alphanumeric
//! characters. Uniqueness is enforced against the order table at creation
//! time, not assumed from randomness.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OrderNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderNumberError {
    /// The token is not exactly [`OrderNumber::LENGTH`] characters.
    #[error("order number must be exactly {expected} characters, got {got}")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Actual length of the input.
        got: usize,
    },
    /// The token contains a character outside `A-Z0-9`.
    #[error("order number may only contain uppercase letters and digits")]
    InvalidCharacter,
}

/// A public order number: 8 uppercase alphanumeric characters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Fixed token length.
    pub const LENGTH: usize = 8;

    /// Characters a token may contain.
    pub const ALPHABET: &'static [u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// Parse an `OrderNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 8 characters or
    /// contains a character outside `A-Z0-9`.
    pub fn parse(s: &str) -> Result<Self, OrderNumberError> {
        if s.len() != Self::LENGTH {
            return Err(OrderNumberError::WrongLength {
                expected: Self::LENGTH,
                got: s.len(),
            });
        }

        if !s.bytes().all(|b| Self::ALPHABET.contains(&b)) {
            return Err(OrderNumberError::InvalidCharacter);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderNumber {
    type Err = OrderNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for OrderNumber {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for OrderNumber {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for OrderNumber {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
