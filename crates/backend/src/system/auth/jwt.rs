use chrono::{DateTime, Duration, Utc};
use contracts::system::auth::{claim, TokenClaims};
use contracts::system::users::UserRecord;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

use super::errors::AuthError;
use crate::shared::config::{ConfigError, JwtConfig};

pub const ACCESS_TOKEN_LIFETIME_MINUTES: i64 = 15;

/// Shorter HS256 secrets are accepted but logged
const RECOMMENDED_KEY_BYTES: usize = 32;

/// Signing material plus the issuer/audience every token must carry
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    leeway_seconds: u64,
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish_non_exhaustive()
    }
}

impl JwtKeys {
    /// Build keys from configuration. A blank key, issuer or audience is a
    /// configuration fault; no token is ever signed with a default secret.
    pub fn from_config(config: &JwtConfig) -> Result<Self, ConfigError> {
        if config.key.trim().is_empty() {
            return Err(ConfigError::Missing("jwt.key"));
        }
        if config.issuer.trim().is_empty() {
            return Err(ConfigError::Missing("jwt.issuer"));
        }
        if config.audience.trim().is_empty() {
            return Err(ConfigError::Missing("jwt.audience"));
        }

        let secret = config.key.as_bytes();
        if secret.len() < RECOMMENDED_KEY_BYTES {
            tracing::warn!(
                "JWT signing key is {} bytes, at least {} are recommended for HS256",
                secret.len(),
                RECOMMENDED_KEY_BYTES
            );
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            leeway_seconds: config.leeway_seconds,
        })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&[claim::EXPIRES_AT, claim::ISSUER, claim::AUDIENCE]);
        validation.leeway = self.leeway_seconds;
        validation
    }

    /// jsonwebtoken still accepts a token during the second `exp` names;
    /// a token is only valid strictly before its expiry (plus leeway).
    fn ensure_not_expired(&self, exp: i64) -> Result<(), AuthError> {
        let leeway = i64::try_from(self.leeway_seconds).unwrap_or(i64::MAX);
        if exp.saturating_add(leeway) <= Utc::now().timestamp() {
            return Err(AuthError::InvalidToken(ErrorKind::ExpiredSignature.into()));
        }
        Ok(())
    }
}

/// Claim set of a token whose signature, issuer, audience and expiry were verified
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedClaims(Map<String, Value>);

impl ValidatedClaims {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    #[cfg(test)]
    pub(crate) fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Generate JWT access token that expires 15 minutes after `issued_at`
pub fn generate_access_token(
    keys: &JwtKeys,
    user: &UserRecord,
    issued_at: DateTime<Utc>,
) -> Result<String, AuthError> {
    let exp = issued_at + Duration::minutes(ACCESS_TOKEN_LIFETIME_MINUTES);

    let claims = TokenClaims {
        sub: user.username.clone(),
        email: user.email.clone(),
        given_name: user.full_name.clone(),
        role: user.role.clone(),
        iss: keys.issuer.clone(),
        aud: keys.audience.clone(),
        iat: issued_at.timestamp(),
        exp: exp.timestamp(),
    };

    encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).map_err(AuthError::Signing)
}

/// Validate JWT token and return its raw claim set
pub fn validate_token(keys: &JwtKeys, token: &str) -> Result<ValidatedClaims, AuthError> {
    let token_data = decode::<Map<String, Value>>(token, &keys.decoding, &keys.validation())?;
    let exp = token_data
        .claims
        .get(claim::EXPIRES_AT)
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .ok_or_else(|| AuthError::InvalidToken(ErrorKind::InvalidToken.into()))?;
    keys.ensure_not_expired(exp)?;
    Ok(ValidatedClaims(token_data.claims))
}

/// Validate JWT token and extract typed claims
pub fn decode_claims(keys: &JwtKeys, token: &str) -> Result<TokenClaims, AuthError> {
    let token_data = decode::<TokenClaims>(token, &keys.decoding, &keys.validation())?;
    keys.ensure_not_expired(token_data.claims.exp)?;
    Ok(token_data.claims)
}
