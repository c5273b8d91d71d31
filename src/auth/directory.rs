//! User directory lookups backed by SurrealDB.

use anyhow::Result;
use sha2::{Digest, Sha256};

use crate::db::Db;
use crate::db::schema::{UserCreate, UserRecord};
use crate::types::{PasswordDigest, UserKey};

/// Read side of the user directory consumed by the authentication pipeline,
/// plus the seeding operations the CLI uses to populate it.
///
/// Every projection leaving this type omits the stored `password` field.
pub struct UserDirectory {
    db: Db,
}

impl UserDirectory {
    /// Create a new directory over an established connection.
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Look up a user by record key, excluding the password field.
    ///
    /// Returns `Ok(None)` when no record matches; an `Err` means the store
    /// itself failed and says nothing about the user's existence.
    pub async fn find_by_key(&self, key: &UserKey) -> Result<Option<UserRecord>> {
        let key = key.to_string();

        let query = r#"
            SELECT * OMIT password FROM user
            WHERE id = type::thing('user', $key)
            LIMIT 1
        "#;

        let mut res = self.db.query(query).bind(("key", key)).await?;

        let users: Vec<UserRecord> = res.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Insert a new user under an explicit record key.
    pub async fn create_user(&self, key: &UserKey, create: &UserCreate) -> Result<UserRecord> {
        let key = key.to_string();
        let email = create.email.clone();
        let display_name = create.display_name.clone();
        let password = create.password.clone();

        let query = r#"
            CREATE type::thing('user', $key) CONTENT {
                email: $email,
                display_name: $display_name,
                password: $password
            }
        "#;

        let mut res = self
            .db
            .query(query)
            .bind(("key", key))
            .bind(("email", email))
            .bind(("display_name", display_name))
            .bind(("password", password))
            .await?;

        let users: Vec<UserRecord> = res.take(0)?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Failed to create user"))
    }

    /// List all users, newest first, passwords omitted.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let mut res = self
            .db
            .query("SELECT * OMIT password FROM user ORDER BY created_at DESC")
            .await?;

        let users: Vec<UserRecord> = res.take(0)?;
        Ok(users)
    }
}

/// Hash a raw password for storage (raw values are never persisted).
pub fn hash_password(raw: &str) -> PasswordDigest {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    let result = hasher.finalize();
    PasswordDigest::new(format!("{:x}", result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DatabaseConfig, create_connection, ensure_schema};

    async fn setup_test_db() -> Db {
        let config = DatabaseConfig {
            url: "memory".to_string(),
            ..Default::default()
        };
        let db = create_connection(config).await.unwrap();
        ensure_schema(&db).await.unwrap();
        db
    }

    fn sample_user(email: &str) -> UserCreate {
        UserCreate {
            email: email.to_string(),
            display_name: Some("Test User".to_string()),
            password: Some(hash_password("hunter2")),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_key() {
        let directory = UserDirectory::new(setup_test_db().await);
        let key = UserKey::new("u1");

        let created = directory
            .create_user(&key, &sample_user("a@b.com"))
            .await
            .unwrap();
        assert_eq!(created.email, "a@b.com");

        let found = directory.find_by_key(&key).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.email, "a@b.com");
        assert_eq!(found.display_name.as_deref(), Some("Test User"));
    }

    #[tokio::test]
    async fn test_find_unknown_key() {
        let directory = UserDirectory::new(setup_test_db().await);

        let found = directory.find_by_key(&UserKey::new("missing")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_projection_omits_password() {
        let directory = UserDirectory::new(setup_test_db().await);
        let key = UserKey::new("u1");

        directory
            .create_user(&key, &sample_user("a@b.com"))
            .await
            .unwrap();

        let found = directory.find_by_key(&key).await.unwrap().unwrap();
        let value = serde_json::to_value(&found).unwrap();
        assert!(value.get("password").is_none());
    }

    #[tokio::test]
    async fn test_list_users() {
        let directory = UserDirectory::new(setup_test_db().await);

        directory
            .create_user(&UserKey::new("u1"), &sample_user("a@b.com"))
            .await
            .unwrap();
        directory
            .create_user(&UserKey::new("u2"), &sample_user("c@d.com"))
            .await
            .unwrap();

        let users = directory.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn test_hash_password() {
        let digest1 = hash_password("hunter2");
        let digest2 = hash_password("hunter2");
        let digest3 = hash_password("different");

        // Should be a hex string
        assert!(digest1.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest1, digest2); // Same input = same output
        assert_ne!(digest1, digest3); // Different input = different output
    }
}
