// src/services/auth.rs

//! Password authentication and session-token identity.
//!
//! Users live in an in-memory registry; passwords are stored as Argon2
//! hashes. Signing in mints an opaque session token (a v4 UUID) mapped to an
//! [`Identity`] for the life of the process. There is no token expiry.

use crate::errors::AppError;
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// The authenticated caller, resolved from a session token. Handlers receive
/// it explicitly; nothing reads identity from ambient state.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
  pub user_id: Uuid,
  pub display_name: String,
  pub email: String,
}

struct UserRecord {
  user_id: Uuid,
  display_name: String,
  email: String,
  password_hash: String,
}

/// Token -> identity map. Tokens are opaque; an unknown token simply
/// resolves to no identity (the request proceeds anonymously).
#[derive(Default)]
pub struct Sessions {
  active: RwLock<HashMap<String, Identity>>,
}

impl Sessions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn identity(&self, token: &str) -> Option<Identity> {
    self.active.read().get(token).cloned()
  }

  fn open(&self, identity: Identity) -> String {
    let token = Uuid::new_v4().to_string();
    self.active.write().insert(token.clone(), identity);
    token
  }

  fn close(&self, token: &str) -> bool {
    self.active.write().remove(token).is_some()
  }
}

/// Minimum accepted password length, matching the hosted auth provider the
/// mobile client used.
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Default)]
pub struct AuthService {
  users: RwLock<HashMap<String, UserRecord>>,
}

impl AuthService {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a user and returns a fresh session token plus the identity.
  #[instrument(name = "auth::sign_up", skip(self, password, sessions))]
  pub fn sign_up(
    &self,
    sessions: &Sessions,
    email: &str,
    password: &str,
    display_name: &str,
  ) -> Result<(String, Identity), AppError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
      return Err(AppError::Validation("A valid email address is required.".to_string()));
    }
    if display_name.trim().is_empty() {
      return Err(AppError::Validation("Display name must not be empty.".to_string()));
    }
    if password.len() < MIN_PASSWORD_LEN {
      return Err(AppError::Validation(format!(
        "Password must be at least {MIN_PASSWORD_LEN} characters."
      )));
    }

    let password_hash = hash_password(password)?;
    let mut users = self.users.write();
    if users.contains_key(&email) {
      return Err(AppError::Validation("An account with this email already exists.".to_string()));
    }

    let identity = Identity {
      user_id: Uuid::new_v4(),
      display_name: display_name.trim().to_string(),
      email: email.clone(),
    };
    users.insert(
      email.clone(),
      UserRecord {
        user_id: identity.user_id,
        display_name: identity.display_name.clone(),
        email,
        password_hash,
      },
    );
    drop(users);

    info!(user_id = %identity.user_id, "user registered");
    Ok((sessions.open(identity.clone()), identity))
  }

  /// Verifies credentials and opens a session.
  #[instrument(name = "auth::sign_in", skip(self, password, sessions))]
  pub fn sign_in(&self, sessions: &Sessions, email: &str, password: &str) -> Result<(String, Identity), AppError> {
    let email = email.trim().to_lowercase();
    let users = self.users.read();
    let record = users
      .get(&email)
      .ok_or_else(|| AppError::Auth("Invalid email or password.".to_string()))?;

    if !verify_password(&record.password_hash, password)? {
      return Err(AppError::Auth("Invalid email or password.".to_string()));
    }

    let identity = Identity {
      user_id: record.user_id,
      display_name: record.display_name.clone(),
      email: record.email.clone(),
    };
    drop(users);

    info!(user_id = %identity.user_id, "user signed in");
    Ok((sessions.open(identity.clone()), identity))
  }

  #[instrument(name = "auth::sign_out", skip(self, sessions, token))]
  pub fn sign_out(&self, sessions: &Sessions, token: &str) -> bool {
    sessions.close(token)
  }

  /// Re-hashes the password after verifying the current one.
  #[instrument(name = "auth::change_password", skip_all, fields(user_id = %identity.user_id))]
  pub fn change_password(&self, identity: &Identity, current: &str, new: &str) -> Result<(), AppError> {
    if new.len() < MIN_PASSWORD_LEN {
      return Err(AppError::Validation(format!(
        "Password must be at least {MIN_PASSWORD_LEN} characters."
      )));
    }

    let mut users = self.users.write();
    let record = users
      .get_mut(&identity.email)
      .ok_or_else(|| AppError::Auth("Account no longer exists.".to_string()))?;

    if !verify_password(&record.password_hash, current)? {
      return Err(AppError::Auth("Current password is incorrect.".to_string()));
    }
    record.password_hash = hash_password(new)?;
    info!(user_id = %identity.user_id, "password changed");
    Ok(())
  }
}

/// Hashes a plain-text password using Argon2 with a fresh random salt.
#[instrument(name = "auth::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    return Err(AppError::Validation("Password cannot be empty for hashing.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  match Argon2::default().hash_password(password.as_bytes(), &salt) {
    Ok(hash) => {
      debug!("Password hashed successfully.");
      Ok(hash.to_string())
    }
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!("Password hashing process failed: {}", argon_err)))
    }
  }
}

/// Verifies a plain-text password against a stored Argon2 hash string.
#[instrument(name = "auth::verify_password", skip(stored_hash, provided), err(Display))]
pub fn verify_password(stored_hash: &str, provided: &str) -> Result<bool, AppError> {
  if stored_hash.is_empty() {
    return Err(AppError::Auth("Invalid stored password format (empty).".to_string()));
  }
  if provided.is_empty() {
    return Err(AppError::Auth("Provided password for verification cannot be empty.".to_string()));
  }

  let parsed_hash = PasswordHash::new(stored_hash)
    .map_err(|e| AppError::Internal(format!("Invalid stored password hash format: {}", e)))?;

  match Argon2::default().verify_password(provided.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(other) => {
      error!(error = %other, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!("Password verification process failed: {}", other)))
    }
  }
}
