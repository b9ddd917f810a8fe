use contracts::system::auth::{claim, AuthenticatedIdentity};

use super::errors::AuthError;
use super::jwt::ValidatedClaims;

/// Rebuild the caller's identity from a validated claim set.
///
/// The token already passed signature and expiry checks, so an absent or
/// non-string identity claim means it was minted wrong. That is reported as
/// `MissingClaim` rather than papered over with an empty value.
pub fn read_identity(claims: &ValidatedClaims) -> Result<AuthenticatedIdentity, AuthError> {
    Ok(AuthenticatedIdentity {
        username: required(claims, claim::SUBJECT)?,
        email: required(claims, claim::EMAIL)?,
        full_name: required(claims, claim::GIVEN_NAME)?,
        role: required(claims, claim::ROLE)?,
    })
}

fn required(claims: &ValidatedClaims, name: &'static str) -> Result<String, AuthError> {
    claims
        .get(name)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or(AuthError::MissingClaim(name))
}
