//! Single-admin authentication: argon2 password verification and opaque
//! bearer sessions with a fixed TTL.
//!
//! A missing, unknown or expired token is always `AuthExpired` — the REST
//! layer turns that into a 401 so clients force a logout instead of
//! showing a dismissible error.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::domain::errors::{DomainError, Result};
use crate::domain::models::user::{Session, User};
use crate::storage::repositories::{SessionRepository, UserRepository};
use crate::storage::DbConnection;

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    sessions: SessionRepository,
    session_ttl_hours: i64,
}

impl AuthService {
    pub fn new(db: DbConnection, session_ttl_hours: i64) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            sessions: SessionRepository::new(db),
            session_ttl_hours,
        }
    }

    /// Create the admin account when the users table is empty. Safe to
    /// call on every startup.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<()> {
        if self.users.count().await? > 0 {
            return Ok(());
        }
        let user = User {
            id: 0,
            username: username.to_string(),
            password_hash: hash_password(password)?,
            full_name: None,
            is_active: true,
            created_at: Utc::now(),
        };
        self.users.insert(&user).await?;
        info!("bootstrapped admin account '{}'", username);
        Ok(())
    }

    /// Verify credentials and open a session. The error for a wrong
    /// username and a wrong password is identical on purpose.
    pub async fn login(&self, username: &str, password: &str) -> Result<(String, User)> {
        let user = self
            .users
            .get_by_username(username)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| DomainError::validation("invalid username or password"))?;
        if !verify_password(password, &user.password_hash)? {
            return Err(DomainError::validation("invalid username or password"));
        }

        let now = Utc::now();
        let session = Session {
            token: generate_token(),
            user_id: user.id,
            expires_at: now + Duration::hours(self.session_ttl_hours),
            created_at: now,
        };
        self.sessions.insert(&session).await?;
        info!("user {} logged in", user.username);
        Ok((session.token, user))
    }

    /// Resolve a bearer token to its user. Expired sessions are pruned on
    /// the spot.
    pub async fn validate_token(&self, token: &str) -> Result<User> {
        let session = self
            .sessions
            .get(token)
            .await?
            .ok_or(DomainError::AuthExpired)?;
        if session.expires_at <= Utc::now() {
            self.sessions.delete(token).await?;
            return Err(DomainError::AuthExpired);
        }
        self.users
            .get(session.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(DomainError::AuthExpired)
    }

    pub async fn logout(&self, token: &str) -> Result<()> {
        self.sessions.delete(token).await?;
        Ok(())
    }
}

fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::Internal(format!("password hashing failed: {e}")))
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| DomainError::Internal(format!("stored password hash malformed: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(DomainError::Internal(format!(
            "password verification failed: {e}"
        ))),
    }
}
