//! Credential verification and account bootstrap.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;
use tracing::{info, warn};

use crate::application::repos::{CreateUserParams, RepoError, UsersRepo};
use crate::domain::entities::UserRecord;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("an account with email `{email}` already exists")]
    EmailTaken { email: String },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UsersRepo>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UsersRepo>) -> Self {
        Self { users }
    }

    /// Check an email/password pair against the stored argon2 hash.
    ///
    /// Unknown emails and wrong passwords are both `Ok(None)` so the caller
    /// cannot distinguish the two.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, AuthError> {
        let Some(user) = self.users.find_user_by_email(email).await? else {
            return Ok(None);
        };

        if verify_password(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            warn!(
                target = "tinta::auth",
                email = email,
                "credential check failed"
            );
            Ok(None)
        }
    }

    /// Create an administrator account. Used by the `create-admin` CLI command.
    pub async fn create_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, AuthError> {
        if self.users.find_user_by_email(email).await?.is_some() {
            return Err(AuthError::EmailTaken {
                email: email.to_string(),
            });
        }

        let password_hash = hash_password(password)?;
        let user = self
            .users
            .create_user(CreateUserParams {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                is_admin: true,
            })
            .await?;

        info!(
            target = "tinta::auth",
            user_id = user.id,
            email = email,
            "created administrator account"
        );
        Ok(user)
    }
}

/// Hash a password into an argon2id PHC string with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::Hash(err.to_string()))
}

/// Verify a password against a stored PHC string. Malformed hashes fail closed.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("hunter2").expect("hash");
        let second = hash_password("hunter2").expect("hash");
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2"));
    }

    #[test]
    fn verify_accepts_matching_password() {
        let hash = hash_password("correct horse").expect("hash");
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
