use serde::{Deserialize, Serialize};

/// Claim names carried in the token payload
pub mod claim {
    pub const SUBJECT: &str = "sub";
    pub const EMAIL: &str = "email";
    pub const GIVEN_NAME: &str = "given_name";
    pub const ROLE: &str = "role";
    pub const ISSUER: &str = "iss";
    pub const AUDIENCE: &str = "aud";
    pub const EXPIRES_AT: &str = "exp";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "Username")]
    pub username: String,
    #[serde(alias = "Password")]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // username
    pub email: String,
    pub given_name: String, // full name
    pub role: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64, // issued at
    pub exp: i64, // expiration timestamp
}

/// Identity reconstructed from a validated token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedIdentity {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_accepts_pascal_case() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"Username":"coot","Password":"test_123"}"#).unwrap();
        assert_eq!(request.username, "coot");
        assert_eq!(request.password, "test_123");
    }

    #[test]
    fn test_token_claims_wire_names() {
        let claims = TokenClaims {
            sub: "coot".into(),
            email: "test_user@tester.com".into(),
            given_name: "Test User".into(),
            role: "Admin".into(),
            iss: "issuer".into(),
            aud: "audience".into(),
            iat: 1,
            exp: 901,
        };
        let value = serde_json::to_value(&claims).unwrap();
        for name in [
            claim::SUBJECT,
            claim::EMAIL,
            claim::GIVEN_NAME,
            claim::ROLE,
            claim::ISSUER,
            claim::AUDIENCE,
            claim::EXPIRES_AT,
        ] {
            assert!(value.get(name).is_some(), "missing claim {name}");
        }
    }
}
