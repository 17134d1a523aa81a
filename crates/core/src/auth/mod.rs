//! Registration, login, and session handling
//!
//! Passwords are argon2-hashed; a successful login issues a week-long
//! session whose token is the actor's credential for later requests.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Role, Session, User};
use crate::storage::UserRepository;

/// Session lifetime issued at login
const SESSION_HOURS: i64 = 24 * 7;

/// Account and session operations
pub struct AuthService<'a, S: UserRepository> {
    store: &'a S,
}

impl<'a, S: UserRepository> AuthService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Register a new account and log it in
    ///
    /// Self-registration always produces a plain User; admins are seeded
    /// out of band.
    #[instrument(skip(self, password))]
    pub fn register(&self, username: &str, password: &str) -> Result<(User, Session)> {
        self.register_with_role(username, password, Role::User)
    }

    /// Register an account with an explicit role (seeding, ops tooling)
    #[instrument(skip(self, password))]
    pub fn register_with_role(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<(User, Session)> {
        validate_credentials(username, password)?;

        if self.store.find_user_by_username(username)?.is_some() {
            return Err(Error::Validation(format!(
                "username {username} is already taken"
            )));
        }

        let password_hash = hash_password(password)?;
        let user = self.store.create_user(username, &password_hash, role)?;

        let session = Session::new(user.id, SESSION_HOURS);
        self.store.create_session(&session)?;

        Ok((user, session))
    }

    /// Verify credentials and issue a session
    ///
    /// Unknown usernames and bad passwords fail identically.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<(User, Session)> {
        let user = self
            .store
            .find_user_by_username(username)?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(invalid_credentials());
        }

        let session = Session::new(user.id, SESSION_HOURS);
        self.store.create_session(&session)?;

        Ok((user, session))
    }

    /// Drop a session
    #[instrument(skip(self))]
    pub fn logout(&self, session_id: Uuid) -> Result<()> {
        self.store.delete_session(session_id)
    }

    /// Resolve a session token to its user
    #[instrument(skip(self))]
    pub fn current_user(&self, session_id: Uuid) -> Result<User> {
        let session = self
            .store
            .find_valid_session(session_id)?
            .ok_or_else(|| Error::Authentication("session expired or unknown".into()))?;

        self.store
            .find_user_by_id(session.user_id)?
            .ok_or_else(|| Error::NotFound(format!("user {}", session.user_id)))
    }

    /// Remove expired sessions, returning how many were dropped
    pub fn cleanup_expired_sessions(&self) -> Result<u64> {
        self.store.cleanup_expired_sessions()
    }
}

/// Hash a password for storage
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| Error::Authentication(format!("failed to hash password: {e}")))
}

/// Check a password against a stored hash
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|e| Error::Authentication(format!("invalid stored password hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.len() < 3 || username.len() > 50 {
        return Err(Error::Validation(
            "username must be 3-50 characters".into(),
        ));
    }
    if password.len() < 6 || password.len() > 100 {
        return Err(Error::Validation(
            "password must be 6-100 characters".into(),
        ));
    }
    Ok(())
}

fn invalid_credentials() -> Error {
    Error::Authentication("invalid username or password".into())
}
