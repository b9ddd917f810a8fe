use anyhow::Result;
use contracts::system::users::UserRecord;

use super::repository::UserStore;

/// Verify user credentials (for login)
///
/// Username comparison ignores case, password comparison is exact. Unknown users
/// and wrong passwords both yield `Ok(None)`; only a failing store is an error.
///
/// Passwords are stored and compared in plaintext, and nothing here rate-limits
/// attempts or equalizes comparison time.
pub async fn verify_credentials(
    store: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<Option<UserRecord>> {
    let candidates = store.find_by_username(username).await?;

    let user = candidates.into_iter().find(|u| u.password == password);

    match &user {
        Some(u) => tracing::debug!(username = %u.username, "credentials accepted"),
        None => tracing::debug!(username = %username, "credentials rejected"),
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::users::repository::InMemoryUserStore;
    use async_trait::async_trait;

    #[tokio::test]
    async fn test_correct_password_any_case() {
        let store = InMemoryUserStore::seeded();
        for name in ["coot", "COOT", "Coot", "cOoT"] {
            let user = verify_credentials(&store, name, "test_123")
                .await
                .unwrap()
                .expect("user should match");
            assert_eq!(user.username, "coot");
            assert_eq!(user.email, "test_user@tester.com");
            assert_eq!(user.full_name, "Test User");
            assert_eq!(user.role, "Admin");
        }
    }

    #[tokio::test]
    async fn test_every_seeded_user_verifies() {
        let store = InMemoryUserStore::seeded();
        for (name, password) in [("coot", "test_123"), ("tommie", "password124")] {
            let user = verify_credentials(&store, name, password).await.unwrap();
            assert_eq!(user.map(|u| u.username), Some(name.to_string()));
        }
    }

    #[tokio::test]
    async fn test_wrong_password_is_not_found() {
        let store = InMemoryUserStore::seeded();
        assert!(verify_credentials(&store, "coot", "wrongpass")
            .await
            .unwrap()
            .is_none());
        // password comparison is case-sensitive
        assert!(verify_credentials(&store, "coot", "TEST_123")
            .await
            .unwrap()
            .is_none());
        // another user's password does not work
        assert!(verify_credentials(&store, "coot", "password124")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let store = InMemoryUserStore::seeded();
        assert!(verify_credentials(&store, "ghost", "test_123")
            .await
            .unwrap()
            .is_none());
        assert!(verify_credentials(&store, "", "").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_usernames_first_full_match_wins() {
        let store = InMemoryUserStore::new(vec![
            UserRecord::new("dup", "first@x.io", "First", "one", "Admin"),
            UserRecord::new("Dup", "second@x.io", "Second", "two", "Reader"),
            UserRecord::new("dup", "third@x.io", "Third", "two", "Reader"),
        ]);

        let user = verify_credentials(&store, "DUP", "two").await.unwrap().unwrap();
        assert_eq!(user.email, "second@x.io");
    }

    struct BrokenStore;

    #[async_trait]
    impl UserStore for BrokenStore {
        async fn find_by_username(&self, _username: &str) -> Result<Vec<UserRecord>> {
            Err(anyhow::anyhow!("store unavailable"))
        }
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        assert!(verify_credentials(&BrokenStore, "coot", "test_123")
            .await
            .is_err());
    }
}
