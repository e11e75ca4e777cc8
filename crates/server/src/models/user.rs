//! Account profile domain types.
//!
//! Authentication is owned by the upstream auth service; these types cover
//! only the profile data the marketplace stores for an already-resolved
//! identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_core::{Email, Role, UserId};

/// A marketplace account profile.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub phone: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Vendor-specific profile data, 1:1 with a vendor account.
#[derive(Debug, Clone, Serialize)]
pub struct VendorProfile {
    pub user_id: UserId,
    pub business_name: String,
    pub description: String,
    /// Unapproved vendors are hidden from the public vendor listing.
    pub approved: bool,
}

/// The public view of a vendor, as returned by the vendor endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct VendorPublic {
    pub id: UserId,
    pub business_name: String,
    pub description: String,
}

impl From<VendorProfile> for VendorPublic {
    fn from(profile: VendorProfile) -> Self {
        Self {
            id: profile.user_id,
            business_name: profile.business_name,
            description: profile.description,
        }
    }
}

/// Body for `PUT /profile`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub phone: Option<String>,
}
