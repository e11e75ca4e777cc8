//! Account roles and their capabilities.
//!
//! The upstream auth service resolves an account to exactly one role; the
//! backend trusts that resolution. Capabilities are explicit methods so a
//! route can state which role may invoke it instead of testing ad hoc
//! boolean flags.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The role of an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A buyer: owns a cart, places orders, writes reviews.
    #[default]
    Customer,
    /// A seller: manages their own products, may use the copy helper.
    Vendor,
    /// Full access, including other vendors' products.
    Admin,
}

impl Role {
    /// Whether this role may create products and edit its own listings.
    #[must_use]
    pub const fn can_manage_products(self) -> bool {
        matches!(self, Self::Vendor | Self::Admin)
    }

    /// Whether this role may edit a product it does not own.
    #[must_use]
    pub const fn can_manage_any_product(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether this role may call the AI copywriter endpoints.
    #[must_use]
    pub const fn can_use_copywriter(self) -> bool {
        matches!(self, Self::Vendor | Self::Admin)
    }

    /// Whether this role may place orders and own a cart.
    #[must_use]
    pub const fn can_shop(self) -> bool {
        matches!(self, Self::Customer | Self::Admin)
    }

    /// Parse a role from its lowercase wire form.
    #[must_use]
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(Self::Customer),
            "vendor" => Some(Self::Vendor),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// The lowercase wire form, stable across serde and the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Vendor => "vendor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// SQLx support (with postgres feature): stored as TEXT
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Role {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Role {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Self::from_wire(s).ok_or_else(|| format!("unknown role in database: {s}").into())
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Role {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_roundtrip() {
        for role in [Role::Customer, Role::Vendor, Role::Admin] {
            assert_eq!(Role::from_wire(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_wire("superuser"), None);
    }

    #[test]
    fn test_capabilities() {
        assert!(Role::Vendor.can_manage_products());
        assert!(!Role::Customer.can_manage_products());
        assert!(Role::Admin.can_manage_any_product());
        assert!(!Role::Vendor.can_manage_any_product());
        assert!(Role::Vendor.can_use_copywriter());
        assert!(!Role::Customer.can_use_copywriter());
        assert!(Role::Customer.can_shop());
        assert!(!Role::Vendor.can_shop());
    }
}
