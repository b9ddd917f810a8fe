use serde::Deserialize;
use std::fmt;

/// Stored user record. Not `Serialize`: the password never leaves the server.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String, // plaintext, compared as-is
    pub role: String,
}

impl UserRecord {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            full_name: full_name.into(),
            password: password.into(),
            role: role.into(),
        }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("password", &"***")
            .field("role", &self.role)
            .finish()
    }
}
