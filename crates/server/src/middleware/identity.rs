//! Identity extraction from gateway headers.
//!
//! Authentication happens upstream: the API gateway verifies the caller and
//! forwards the resolved identity in `x-vendora-user-id` and
//! `x-vendora-role`. This service trusts those headers; it must never be
//! exposed to clients directly.

use axum::{extract::FromRequestParts, http::request::Parts};

use vendora_core::{Role, UserId};

use crate::error::AppError;

/// Header carrying the authenticated account ID.
pub const USER_ID_HEADER: &str = "x-vendora-user-id";
/// Header carrying the authenticated account's role.
pub const ROLE_HEADER: &str = "x-vendora-role";

/// Extractor for the authenticated caller. Rejects with 401 when the
/// gateway headers are missing or malformed.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: UserId,
    pub role: Role,
}

impl CurrentUser {
    /// Reject callers whose role can't manage products.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` for customer accounts.
    pub fn require_vendor(&self) -> Result<(), AppError> {
        if self.role.can_manage_products() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "vendor account required".to_string(),
            ))
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i32>().ok())
            .map(UserId::new)
            .ok_or_else(|| AppError::Unauthorized("missing identity".to_string()))?;

        let role = parts
            .headers
            .get(ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(Role::from_wire)
            .ok_or_else(|| AppError::Unauthorized("missing role".to_string()))?;

        Ok(Self { id, role })
    }
}

/// Extractor for routes that work with or without a caller identity.
#[derive(Debug, Clone, Copy)]
pub struct OptionalUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(CurrentUser::from_request_parts(parts, state).await.ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<CurrentUser, AppError> {
        let (mut parts, ()) = request.into_parts();
        CurrentUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_identity_from_headers() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "42")
            .header(ROLE_HEADER, "vendor")
            .body(())
            .expect("request");

        let user = extract(request).await.expect("identity");
        assert_eq!(user.id, UserId::new(42));
        assert_eq!(user.role, Role::Vendor);
    }

    #[tokio::test]
    async fn test_missing_headers_are_unauthorized() {
        let request = Request::builder().body(()).expect("request");
        assert!(matches!(
            extract(request).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_user_id_is_unauthorized() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "not-a-number")
            .header(ROLE_HEADER, "customer")
            .body(())
            .expect("request");

        assert!(matches!(
            extract(request).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_role_is_unauthorized() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "5")
            .header(ROLE_HEADER, "superuser")
            .body(())
            .expect("request");

        assert!(matches!(
            extract(request).await,
            Err(AppError::Unauthorized(_))
        ));
    }
}
