use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use contracts::system::auth::AuthenticatedIdentity;

use super::claims::read_identity;
use super::jwt::ValidatedClaims;

/// Extractor for getting the current user from a validated token
/// Usage in handlers: `async fn handler(CurrentUser(identity): CurrentUser) -> Response`
/// Requires `require_auth` on the route.
pub struct CurrentUser(pub AuthenticatedIdentity);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<ValidatedClaims>()
            .ok_or_else(|| StatusCode::UNAUTHORIZED.into_response())?;

        read_identity(claims)
            .map(CurrentUser)
            .map_err(IntoResponse::into_response)
    }
}
