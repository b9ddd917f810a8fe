use anyhow::Result;
use async_trait::async_trait;
use contracts::system::users::UserRecord;
use once_cell::sync::Lazy;

/// Lookup capability the credential verifier depends on.
/// A database-backed store can replace the in-memory one without touching the verifier.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All records whose username equals `username` ignoring case, in store order
    async fn find_by_username(&self, username: &str) -> Result<Vec<UserRecord>>;
}

static SEED_USERS: Lazy<Vec<UserRecord>> = Lazy::new(|| {
    vec![
        UserRecord::new(
            "coot",
            "test_user@tester.com",
            "Test User",
            "test_123",
            "Admin",
        ),
        UserRecord::new(
            "tommie",
            "test_user2@tester.com",
            "Test User2",
            "password124",
            "contibutor",
        ),
    ]
});

/// Read-only in-memory user list. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct InMemoryUserStore {
    users: Vec<UserRecord>,
}

impl InMemoryUserStore {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    /// Store holding the built-in demo users
    pub fn seeded() -> Self {
        Self::new(SEED_USERS.clone())
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Vec<UserRecord>> {
        let wanted = username.to_lowercase();
        Ok(self
            .users
            .iter()
            .filter(|u| u.username.to_lowercase() == wanted)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_store_contents() {
        let store = InMemoryUserStore::seeded();
        assert_eq!(store.len(), 2);

        let found = store.find_by_username("tommie").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].role, "contibutor");
    }

    #[tokio::test]
    async fn test_find_ignores_case() {
        let store = InMemoryUserStore::seeded();
        let found = store.find_by_username("CoOt").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "coot");
    }

    #[tokio::test]
    async fn test_find_unknown_is_empty() {
        let store = InMemoryUserStore::seeded();
        assert!(store.find_by_username("nobody").await.unwrap().is_empty());
        assert!(store.find_by_username("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicates_keep_store_order() {
        let store = InMemoryUserStore::new(vec![
            UserRecord::new("dup", "first@x.io", "First", "one", "Admin"),
            UserRecord::new("other", "o@x.io", "Other", "pw", "Admin"),
            UserRecord::new("DUP", "second@x.io", "Second", "two", "Reader"),
        ]);
        let found = store.find_by_username("dup").await.unwrap();
        let emails: Vec<_> = found.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["first@x.io", "second@x.io"]);
    }
}
