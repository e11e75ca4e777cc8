//! Address domain types.

use serde::{Deserialize, Serialize};

use vendora_core::{AddressId, AddressKind, UserId};

/// A saved billing or shipping address.
///
/// At most one address per (account, kind) carries `is_default`; the
/// repository enforces this by clearing competing defaults in the same
/// transaction as the write.
#[derive(Debug, Clone, Serialize)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub kind: AddressKind,
    pub is_default: bool,
}

/// Address fields as submitted by a client, either standalone
/// (`POST /addresses`) or inline in a checkout request.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressInput {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    /// Save as the account's default for its kind.
    #[serde(default)]
    pub default: bool,
}

impl AddressInput {
    /// Structural validation: no blank required fields.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !(self.street.trim().is_empty()
            || self.city.trim().is_empty()
            || self.state.trim().is_empty()
            || self.zip_code.trim().is_empty()
            || self.country.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> AddressInput {
        AddressInput {
            street: "1 Main St".to_owned(),
            city: "Springfield".to_owned(),
            state: "IL".to_owned(),
            zip_code: "62701".to_owned(),
            country: "US".to_owned(),
            default: false,
        }
    }

    #[test]
    fn test_complete_address() {
        assert!(input().is_complete());
    }

    #[test]
    fn test_blank_field_is_incomplete() {
        let mut bad = input();
        bad.city = "   ".to_owned();
        assert!(!bad.is_complete());
    }
}
