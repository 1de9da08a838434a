//! User repository for the credential store
//!
//! Passwords are stored only as salted argon2 PHC strings; the plaintext
//! never leaves the create/verify calls. Username and email uniqueness is
//! enforced by the database and surfaced as a distinct error.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use sqlx::{PgPool, Row};
use thiserror::Error;
use tracing::info;

use crate::models::user::{User, UserSummary};

/// Errors raised by the credential store
#[derive(Error, Debug)]
pub enum UserStoreError {
    /// Username or email already taken
    #[error("username or email already exists")]
    Duplicate,

    /// Password hashing or hash parsing failed
    #[error("password hash error: {0}")]
    Hash(String),

    /// Underlying database failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with a salted one-way password hash
    ///
    /// A unique violation on username or email maps to
    /// [`UserStoreError::Duplicate`] so the caller can answer with a clean
    /// conflict instead of a generic failure.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, UserStoreError> {
        info!("Creating new user: {}", username);

        let password_hash = hash_password(password)?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => UserStoreError::Duplicate,
            _ => UserStoreError::Database(e),
        })?;

        Ok(User {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    /// Find a user by exact username match
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| User {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }

    /// Verify a password against a user's stored hash
    pub fn verify_password(&self, user: &User, password: &str) -> Result<bool, UserStoreError> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| UserStoreError::Hash(e.to_string()))?;

        let result = Argon2::default().verify_password(password.as_bytes(), &parsed_hash);

        Ok(result.is_ok())
    }

    /// List all users as their public projections
    pub async fn list_all(&self) -> Result<Vec<UserSummary>, UserStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, email
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| UserSummary {
                id: row.get("id"),
                username: row.get("username"),
                email: row.get("email"),
            })
            .collect())
    }
}

/// Hash a password into a salted argon2 PHC string
fn hash_password(password: &str) -> Result<String, UserStoreError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| UserStoreError::Hash(e.to_string()))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_embeds_algorithm_tag_and_never_plaintext() {
        let hash = hash_password("secret1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(!hash.contains("secret1"));
    }

    #[test]
    fn hash_verifies_matching_password_only() {
        let hash = hash_password("secret1").unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();

        assert!(
            Argon2::default()
                .verify_password(b"secret1", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrong", &parsed)
                .is_err()
        );
    }

    #[test]
    fn two_hashes_of_one_password_differ_by_salt() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();
        assert_ne!(first, second);
    }
}
